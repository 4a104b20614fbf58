use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::config::CAPITAL_MARGIN;
use crate::faction::Faction;
use crate::grid::Grid;
use crate::tile::{Feature, Terrain};

/// Столицы не ставятся ближе этого расстояния друг к другу (если хватает места)
pub const MIN_CAPITAL_SEPARATION: usize = 3;

/// Размещает по одной столице на фракцию, максимизируя минимальное расстояние
///
/// Для каждой фракции по порядку кандидаты — клетки суши не ближе двух клеток к краю
/// и не ближе `MIN_CAPITAL_SEPARATION` к уже поставленным столицам. Из кандидатов с
/// наибольшим минимальным расстоянием до других столиц выбирается случайный.
///
/// Вырожденные случаи не считаются ошибкой: если кандидатов нет, ограничение на
/// расстояние снимается для этой фракции; если нет и внутренней суши, берётся любая
/// внутренняя клетка и превращается в сушу.
///
/// Возвращает индексы столиц в порядке фракций.
pub fn place_capitals<R: Rng + ?Sized>(
    grid: &mut Grid,
    factions: &[Faction],
    rng: &mut R,
) -> Vec<usize> {
    let size = grid.size();
    let interior: Vec<usize> = (CAPITAL_MARGIN..size.saturating_sub(CAPITAL_MARGIN))
        .flat_map(|row| {
            (CAPITAL_MARGIN..size.saturating_sub(CAPITAL_MARGIN)).map(move |col| (row, col))
        })
        .map(|(row, col)| grid.index(row, col))
        .collect();

    let mut capitals: Vec<usize> = Vec::with_capacity(factions.len());

    for &faction in factions {
        let ground = |cell: &usize| grid.terrain(*cell) == Terrain::Ground;
        let free = |cell: &usize| !capitals.contains(cell);

        let mut candidates: Vec<usize> = interior
            .iter()
            .copied()
            .filter(ground)
            .filter(|&cell| {
                capitals
                    .iter()
                    .all(|&cap| grid.distance(cell, cap) >= MIN_CAPITAL_SEPARATION)
            })
            .collect();

        if candidates.is_empty() {
            warn!(%faction, "no separated capital site, relaxing separation");
            candidates = interior.iter().copied().filter(ground).filter(free).collect();
        }
        if candidates.is_empty() {
            warn!(%faction, "no interior ground left, forcing a capital site");
            candidates = interior.iter().copied().filter(free).collect();
        }

        let score = |cell: usize| {
            capitals
                .iter()
                .map(|&cap| grid.distance(cell, cap))
                .min()
                .unwrap_or(size)
        };
        let best = candidates.iter().map(|&cell| score(cell)).max().unwrap_or(0);
        let choices: Vec<usize> = candidates
            .into_iter()
            .filter(|&cell| score(cell) == best)
            .collect();

        // Пустой список невозможен: число фракций ограничено числом внутренних клеток
        let Some(&chosen) = choices.choose(rng) else {
            warn!(%faction, "no room for a capital");
            continue;
        };

        let tile = grid.tile_mut(chosen);
        tile.terrain = Terrain::Ground;
        tile.feature = Some(Feature::Capital);
        tile.claim(faction);
        capitals.push(chosen);
    }

    capitals
}
