// src/territory.rs
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::GenerationError;
use crate::faction::Faction;
use crate::grid::Grid;
use crate::tile::Terrain;

/// Рост территорий случайным расширением фронтира от столиц
///
/// Каждая фракция по очереди берёт случайную клетку своего фронтира и захватывает
/// случайного незанятого соседа (сначала не океан, затем любого). Клетка без
/// свободных соседей выбывает из фронтира. Нерасширяющиеся фракции пропускаются.
///
/// В отличие от разбиения Вороного границы получаются неровными, а полнота
/// покрытия следует из того, что множество занятых клеток только растёт.
pub fn grow_territory<R: Rng + ?Sized>(
    grid: &mut Grid,
    factions: &[Faction],
    capitals: &[usize],
    rng: &mut R,
) -> Result<(), GenerationError> {
    let total = grid.len();
    let mut done = vec![false; total];
    let mut done_count = 0;
    let mut frontiers: Vec<Vec<usize>> = Vec::with_capacity(capitals.len());

    for &capital in capitals {
        if !done[capital] {
            done[capital] = true;
            done_count += 1;
        }
        frontiers.push(vec![capital]);
    }

    while done_count < total {
        let mut active = false;

        for (&faction, frontier) in factions.iter().zip(frontiers.iter_mut()) {
            if !faction.expands() || frontier.is_empty() {
                continue;
            }
            active = true;

            let pick = rng.gen_range(0..frontier.len());
            let neighbours = grid.disk(frontier[pick], 1);

            let mut open: Vec<usize> = neighbours
                .iter()
                .copied()
                .filter(|&n| !done[n] && grid.terrain(n) != Terrain::Ocean)
                .collect();
            if open.is_empty() {
                open = neighbours.into_iter().filter(|&n| !done[n]).collect();
            }

            match open.choose(rng) {
                Some(&next) => {
                    grid.tile_mut(next).claim(faction);
                    done[next] = true;
                    done_count += 1;
                    frontier.push(next);
                }
                None => {
                    frontier.remove(pick);
                }
            }
        }

        if !active {
            return Err(GenerationError::TerritoryStalled {
                remaining: total - done_count,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capital::place_capitals;
    use crate::land::shape_land;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn grown(seed: u64, factions: &[Faction]) -> (Grid, Vec<usize>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(14, factions[0]);
        shape_land(&mut grid, 0.5, 3, 0.5, &mut rng);
        let capitals = place_capitals(&mut grid, factions, &mut rng);
        grow_territory(&mut grid, factions, &capitals, &mut rng).unwrap();
        (grid, capitals)
    }

    #[test]
    fn every_tile_is_claimed() {
        let factions = [Faction::Vengir, Faction::Bardur, Faction::Oumaji];
        for seed in 0..10 {
            let (grid, _) = grown(seed, &factions);
            let mut sizes: HashMap<Faction, usize> = HashMap::new();
            for tile in grid.tiles() {
                assert!(factions.contains(&tile.faction));
                assert_eq!(tile.faction, tile.original_faction);
                *sizes.entry(tile.faction).or_default() += 1;
            }
            assert_eq!(sizes.values().sum::<usize>(), 14 * 14);
            assert_eq!(sizes.len(), 3, "every faction keeps at least its capital");
        }
    }

    #[test]
    fn territories_are_connected_to_their_capital() {
        let factions = [Faction::Imperius, Faction::Kickoo];
        let (grid, capitals) = grown(11, &factions);

        for (&faction, &capital) in factions.iter().zip(&capitals) {
            let mut seen = vec![false; grid.len()];
            let mut stack = vec![capital];
            seen[capital] = true;
            while let Some(cell) = stack.pop() {
                for n in grid.disk(cell, 1) {
                    if !seen[n] && grid.tile(n).faction == faction {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
            let owned = grid.tiles().iter().filter(|t| t.faction == faction).count();
            assert_eq!(seen.iter().filter(|&&s| s).count(), owned);
        }
    }

    #[test]
    fn polaris_keeps_only_its_capital() {
        let factions = [Faction::Polaris, Faction::Luxidoor];
        let (grid, capitals) = grown(3, &factions);
        let polaris: Vec<usize> = (0..grid.len())
            .filter(|&i| grid.tile(i).faction == Faction::Polaris)
            .collect();
        assert_eq!(polaris, vec![capitals[0]]);
    }

    #[test]
    fn stalls_without_expanding_faction() {
        let mut grid = Grid::new(6, Faction::Polaris);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let capital = grid.index(2, 2);
        grid.tile_mut(capital).claim(Faction::Polaris);
        let err = grow_territory(&mut grid, &[Faction::Polaris], &[capital], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::TerritoryStalled { remaining: 35 }
        ));
    }
}
