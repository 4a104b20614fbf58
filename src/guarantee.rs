// src/guarantee.rs
//! Гарантии стартовых ресурсов у столиц
//!
//! Некоторые фракции должны начинать игру с определённым набором ресурсов
//! рядом со столицей. Правила заданы таблицей `GUARANTEES`, а не условиями
//! в коде: новая фракция с гарантией — это новая строка таблицы.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::faction::Faction;
use crate::grid::Grid;
use crate::tile::{Feature, Terrain};

/// Где вокруг столицы можно добавлять ресурс
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuaranteeArea {
    /// Восемь клеток вокруг столицы
    Ring,
    /// Четыре ортогональных соседа
    Cross,
}

/// Правило постобработки окрестностей столицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guarantee {
    /// Не меньше `quantity` ресурсов `feature` в кольце столицы.
    /// Недостающие ставятся в `area` вместе с рельефом `terrain`.
    Resource {
        feature: Feature,
        terrain: Terrain,
        quantity: usize,
        area: GuaranteeArea,
    },
    /// Фракция забирает себе всё кольцо вокруг столицы
    ClaimRing,
}

pub const GUARANTEES: &[(Faction, Guarantee)] = &[
    (
        Faction::Imperius,
        Guarantee::Resource {
            feature: Feature::Fruit,
            terrain: Terrain::Ground,
            quantity: 2,
            area: GuaranteeArea::Ring,
        },
    ),
    (
        Faction::Bardur,
        Guarantee::Resource {
            feature: Feature::Game,
            terrain: Terrain::Forest,
            quantity: 2,
            area: GuaranteeArea::Ring,
        },
    ),
    (
        Faction::Kickoo,
        Guarantee::Resource {
            feature: Feature::Fish,
            terrain: Terrain::Water,
            quantity: 2,
            area: GuaranteeArea::Cross,
        },
    ),
    (
        Faction::Zebasi,
        Guarantee::Resource {
            feature: Feature::Crop,
            terrain: Terrain::Ground,
            quantity: 1,
            area: GuaranteeArea::Ring,
        },
    ),
    (
        Faction::Elyrion,
        Guarantee::Resource {
            feature: Feature::Game,
            terrain: Terrain::Forest,
            quantity: 2,
            area: GuaranteeArea::Ring,
        },
    ),
    (Faction::Polaris, Guarantee::ClaimRing),
];

#[must_use]
pub fn guarantee_for(faction: Faction) -> Option<Guarantee> {
    GUARANTEES
        .iter()
        .find(|(f, _)| *f == faction)
        .map(|&(_, rule)| rule)
}

/// Применяет правила ко всем столицам по порядку фракций
///
/// Правило выбирается по текущему владельцу столицы. Возвращает число
/// добавленных ресурсов.
pub fn apply_guarantees<R: Rng + ?Sized>(grid: &mut Grid, capitals: &[usize], rng: &mut R) -> usize {
    let mut placed = 0;
    for &capital in capitals {
        let faction = grid.tile(capital).faction;
        match guarantee_for(faction) {
            Some(Guarantee::Resource {
                feature,
                terrain,
                quantity,
                area,
            }) => {
                placed += top_up(grid, capital, feature, terrain, quantity, area, rng);
            }
            Some(Guarantee::ClaimRing) => {
                for cell in grid.ring(capital, 1) {
                    let tile = grid.tile_mut(cell);
                    if !tile.is_capital() {
                        tile.faction = faction;
                    }
                }
            }
            None => {}
        }
    }
    placed
}

fn top_up<R: Rng + ?Sized>(
    grid: &mut Grid,
    capital: usize,
    feature: Feature,
    terrain: Terrain,
    quantity: usize,
    area: GuaranteeArea,
    rng: &mut R,
) -> usize {
    let ring = grid.ring(capital, 1);
    let mut slots = match area {
        GuaranteeArea::Ring => ring.clone(),
        GuaranteeArea::Cross => grid.cross(capital),
    };
    slots.retain(|&cell| !grid.tile(cell).is_capital());

    // Сверх того, что уже есть вне `slots`, больше чем `slots.len()` не добавить
    let outside = ring
        .iter()
        .filter(|&&cell| !slots.contains(&cell))
        .filter(|&&cell| grid.tile(cell).feature == Some(feature))
        .count();
    let target = quantity.min(outside + slots.len());

    let mut placed = 0;
    while count_in(grid, &ring, feature) < target {
        let Some(&cell) = slots.choose(rng) else {
            break;
        };
        if grid.tile(cell).feature != Some(feature) {
            placed += 1;
        }
        let tile = grid.tile_mut(cell);
        tile.terrain = terrain;
        tile.feature = Some(feature);

        if terrain.is_land() {
            shore_up(grid, cell);
        } else {
            recede(grid, cell);
        }
    }
    placed
}

fn count_in(grid: &Grid, cells: &[usize], feature: Feature) -> usize {
    cells
        .iter()
        .filter(|&&cell| grid.tile(cell).feature == Some(feature))
        .count()
}

/// Новая суша превращает соседний океан в мелководье
fn shore_up(grid: &mut Grid, cell: usize) {
    for n in grid.cross(cell) {
        if grid.terrain(n) == Terrain::Ocean {
            grid.set_terrain(n, Terrain::Water);
        }
    }
}

/// Мелководье рядом с новой водой, потерявшее контакт с сушей, снова становится океаном
fn recede(grid: &mut Grid, cell: usize) {
    for n in grid.cross(cell) {
        if grid.terrain(n) != Terrain::Water {
            continue;
        }
        let touches_land = grid.cross(n).into_iter().any(|m| grid.terrain(m).is_land());
        if !touches_land {
            grid.set_terrain(n, Terrain::Ocean);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn with_capital(size: usize, faction: Faction, terrain: Terrain) -> (Grid, usize) {
        let mut grid = Grid::new(size, faction);
        for cell in 0..grid.len() {
            grid.set_terrain(cell, terrain);
        }
        let capital = grid.index(size / 2, size / 2);
        grid.set_terrain(capital, Terrain::Ground);
        grid.tile_mut(capital).feature = Some(Feature::Capital);
        (grid, capital)
    }

    fn count(grid: &Grid, capital: usize, feature: Feature) -> usize {
        grid.ring(capital, 1)
            .into_iter()
            .filter(|&c| grid.tile(c).feature == Some(feature))
            .count()
    }

    #[test]
    fn table_has_one_rule_per_faction() {
        for (i, (a, _)) in GUARANTEES.iter().enumerate() {
            assert!(GUARANTEES[i + 1..].iter().all(|(b, _)| a != b));
        }
        assert!(guarantee_for(Faction::Vengir).is_none());
        assert_eq!(guarantee_for(Faction::Polaris), Some(Guarantee::ClaimRing));
    }

    #[test]
    fn imperius_gets_two_fruits_and_coast() {
        let (mut grid, capital) = with_capital(9, Faction::Imperius, Terrain::Ocean);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let placed = apply_guarantees(&mut grid, &[capital], &mut rng);

        assert_eq!(placed, 2);
        assert_eq!(count(&grid, capital, Feature::Fruit), 2);
        for cell in grid.ring(capital, 1) {
            if grid.tile(cell).feature == Some(Feature::Fruit) {
                assert_eq!(grid.terrain(cell), Terrain::Ground);
                for n in grid.cross(cell) {
                    assert_ne!(grid.terrain(n), Terrain::Ocean);
                }
            }
        }
        assert!(grid.tile(capital).is_capital());
    }

    #[test]
    fn existing_resources_count_towards_the_guarantee() {
        let (mut grid, capital) = with_capital(9, Faction::Bardur, Terrain::Forest);
        for cell in grid.ring(capital, 1).into_iter().take(3) {
            grid.tile_mut(cell).feature = Some(Feature::Game);
        }
        let before = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(apply_guarantees(&mut grid, &[capital], &mut rng), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn kickoo_gets_fish_on_orthogonal_water() {
        let (mut grid, capital) = with_capital(9, Faction::Kickoo, Terrain::Ground);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        apply_guarantees(&mut grid, &[capital], &mut rng);

        let fish: Vec<usize> = grid
            .cross(capital)
            .into_iter()
            .filter(|&c| grid.tile(c).feature == Some(Feature::Fish))
            .collect();
        assert_eq!(fish.len(), 2);
        for cell in fish {
            assert_eq!(grid.terrain(cell), Terrain::Water);
        }
    }

    #[test]
    fn recede_restores_open_ocean() {
        let mut grid = Grid::new(7, Faction::Kickoo);
        let island = grid.index(3, 3);
        grid.set_terrain(island, Terrain::Ground);
        for n in grid.cross(island) {
            grid.set_terrain(n, Terrain::Water);
        }
        // Остров ушёл под воду: мелководье вокруг него больше не у берега
        grid.set_terrain(island, Terrain::Water);
        recede(&mut grid, island);
        for n in grid.cross(island) {
            assert_eq!(grid.terrain(n), Terrain::Ocean);
        }
    }

    #[test]
    fn polaris_claims_ring_without_touching_original_faction() {
        let (mut grid, capital) = with_capital(7, Faction::Vengir, Terrain::Ground);
        grid.tile_mut(capital).claim(Faction::Polaris);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        apply_guarantees(&mut grid, &[capital], &mut rng);

        for cell in grid.ring(capital, 1) {
            assert_eq!(grid.tile(cell).faction, Faction::Polaris);
            assert_eq!(grid.tile(cell).original_faction, Faction::Vengir);
        }
        assert_eq!(grid.tile(grid.index(0, 0)).faction, Faction::Vengir);
    }

    #[test]
    fn neighbouring_capitals_are_never_overwritten() {
        let (mut grid, capital) = with_capital(9, Faction::Zebasi, Terrain::Ground);
        let others: Vec<usize> = grid.ring(capital, 1);
        for &cell in &others {
            grid.tile_mut(cell).feature = Some(Feature::Capital);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(apply_guarantees(&mut grid, &[capital], &mut rng), 0);
        for cell in others {
            assert!(grid.tile(cell).is_capital());
        }
    }
}
