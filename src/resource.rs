// src/resource.rs
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GeneralRates;
use crate::faction::Affinity;
use crate::grid::Grid;
use crate::settlement::{CLOSE, CoverageMap, ELIGIBLE, INELIGIBLE, NEAR, OCCUPIED};
use crate::tile::{Feature, Terrain};

/// Множитель вероятности ресурсов на дальнем кольце поселения
pub const BORDER_EXPANSION: f64 = 1.0 / 3.0;

/// Бросок с учётом покрытия: полный шанс у поселения, треть на дальнем кольце, иначе никогда
fn coverage_roll<R: Rng + ?Sized>(level: i8, probability: f64, rng: &mut R) -> bool {
    match level {
        CLOSE => rng.gen_range(0.0..1.0) < probability,
        NEAR => rng.gen_range(0.0..1.0) < probability * BORDER_EXPANSION,
        _ => false,
    }
}

/// Расставляет деревни и ресурсы по карте покрытия
///
/// Деревня вытесняет всё остальное (и вырубает лес под собой). На равнине
/// фрукты, урожай и споры ослабляют друг друга, чтобы клетки не были
/// перенасыщены. Столицы не трогаются.
pub fn place_resources<R: Rng + ?Sized>(
    grid: &mut Grid,
    coverage: &CoverageMap,
    rates: &GeneralRates,
    rng: &mut R,
) {
    for cell in 0..grid.len() {
        let tile = *grid.tile(cell);
        if tile.is_capital() {
            continue;
        }
        let faction = tile.original_faction;
        let level = coverage.level(cell);
        let rate = |base: f64, kind: Affinity| base * faction.affinity(kind);

        let feature = match tile.terrain {
            Terrain::Ground => {
                let fruit = rate(rates.fruit, Affinity::Fruit);
                let crop = rate(rates.crop, Affinity::Crop);
                let spore = rate(rates.crop, Affinity::Spore);

                if level == OCCUPIED {
                    Some(Feature::Village)
                } else if coverage_roll(level, fruit * (1.0 - crop / 2.0), rng) {
                    Some(Feature::Fruit)
                } else if coverage_roll(level, crop * (1.0 - fruit / 2.0), rng) {
                    Some(Feature::Crop)
                } else if coverage_roll(level, spore * (1.0 - fruit / 2.0), rng) {
                    Some(Feature::Spore)
                } else if coverage_roll(level, crop * (1.0 - spore / 2.0), rng) {
                    Some(Feature::Crop)
                } else {
                    None
                }
            }
            Terrain::Forest => {
                if level == OCCUPIED {
                    grid.set_terrain(cell, Terrain::Ground);
                    Some(Feature::Village)
                } else if coverage_roll(level, rate(rates.game, Affinity::Game), rng) {
                    Some(Feature::Game)
                } else {
                    None
                }
            }
            Terrain::Water => {
                coverage_roll(level, rate(rates.fish, Affinity::Fish), rng).then_some(Feature::Fish)
            }
            Terrain::Ocean => coverage_roll(level, rate(rates.starfish, Affinity::Starfish), rng)
                .then_some(Feature::Starfish),
            Terrain::Mountain => {
                coverage_roll(level, rate(rates.metal, Affinity::Metal), rng).then_some(Feature::Metal)
            }
        };

        if feature.is_some() {
            grid.tile_mut(cell).feature = feature;
        }
    }
}

/// Число руин на карте заданного размера: `round(size² / 40)`
#[must_use]
pub fn ruin_count(size: usize) -> usize {
    ((size * size) as f64 / 40.0).round() as usize
}

/// Расставляет руины вдали от поселений
///
/// Не больше трети руин попадает в океан, на мелководье руин нет. Каждая руина
/// поднимает покрытие соседей, чтобы руины не скапливались. Если подходящих
/// клеток не осталось, размещение останавливается раньше. Возвращает индексы руин.
pub fn place_ruins<R: Rng + ?Sized>(
    grid: &mut Grid,
    coverage: &mut CoverageMap,
    rng: &mut R,
) -> Vec<usize> {
    let target = ruin_count(grid.size());
    let ocean_quota = (target as f64 / 3.0).round() as usize;
    let mut ocean_ruins = 0;
    let mut ruins = Vec::with_capacity(target);

    while ruins.len() < target {
        let candidates: Vec<usize> = (0..grid.len())
            .filter(|&cell| matches!(coverage.level(cell), INELIGIBLE | ELIGIBLE | NEAR))
            .filter(|&cell| match grid.terrain(cell) {
                Terrain::Water => false,
                Terrain::Ocean => ocean_ruins < ocean_quota,
                _ => true,
            })
            .collect();
        let Some(&ruin) = candidates.choose(rng) else {
            break;
        };

        if grid.terrain(ruin) == Terrain::Ocean {
            ocean_ruins += 1;
        }
        grid.tile_mut(ruin).feature = Some(Feature::Ruin);
        coverage.raise(grid, ruin, 1, CLOSE);
        ruins.push(ruin);
    }

    ruins
}
