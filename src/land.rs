use rand::Rng;

use crate::grid::Grid;
use crate::tile::Terrain;

/// Случайно превращает океан в сушу, пока не наберётся `⌊size²·ratio⌋` клеток
///
/// Выборка с возвращением: уже ставшие сушей клетки пропускаются и не считаются дважды.
/// Возвращает число превращённых клеток.
pub fn seed_land<R: Rng + ?Sized>(grid: &mut Grid, initial_land: f64, rng: &mut R) -> usize {
    let total = grid.len();
    let target = ((total as f64) * initial_land).floor() as usize;
    let target = target.min(total);

    let mut converted = 0;
    while converted < target {
        let cell = rng.gen_range(0..total);
        if grid.terrain(cell) == Terrain::Ocean {
            grid.set_terrain(cell, Terrain::Ground);
            converted += 1;
        }
    }
    converted
}

/// Клеточный автомат сглаживания суши
///
/// За один проход для каждой клетки считается доля океана в квадрате 3×3.
/// Решения применяются только после полного прохода, чтобы порядок обхода не влиял на результат.
pub fn smooth_land(grid: &mut Grid, iterations: u32, land_coefficient: f64) {
    let mut becomes_land = vec![false; grid.len()];

    for _ in 0..iterations {
        for (cell, mark) in becomes_land.iter_mut().enumerate() {
            let neighbours = grid.square(cell, 1);
            let water = neighbours
                .iter()
                .filter(|&&n| grid.terrain(n) == Terrain::Ocean)
                .count();
            let water_ratio = water as f64 / neighbours.len() as f64;
            *mark = water_ratio <= land_coefficient;
        }

        for (cell, &land) in becomes_land.iter().enumerate() {
            let terrain = if land { Terrain::Ground } else { Terrain::Ocean };
            grid.set_terrain(cell, terrain);
        }
    }
}

/// Формирует сушу: засев + сглаживание
pub fn shape_land<R: Rng + ?Sized>(
    grid: &mut Grid,
    initial_land: f64,
    smoothing: u32,
    land_coefficient: f64,
    rng: &mut R,
) -> usize {
    seed_land(grid, initial_land, rng);
    smooth_land(grid, smoothing, land_coefficient);
    grid.tiles()
        .iter()
        .filter(|tile| tile.terrain == Terrain::Ground)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faction::Faction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn land_count(grid: &Grid) -> usize {
        grid.tiles()
            .iter()
            .filter(|t| t.terrain == Terrain::Ground)
            .count()
    }

    #[test]
    fn seeding_hits_exact_target() {
        let mut grid = Grid::new(10, Faction::XinXi);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(seed_land(&mut grid, 0.37, &mut rng), 37);
        assert_eq!(land_count(&grid), 37);
    }

    #[test]
    fn seeding_full_ratio_terminates() {
        let mut grid = Grid::new(6, Faction::XinXi);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(seed_land(&mut grid, 1.0, &mut rng), 36);
    }

    #[test]
    fn fixed_coefficient_of_one_floods_everything() {
        let mut grid = Grid::new(8, Faction::XinXi);
        smooth_land(&mut grid, 1, 1.0);
        assert_eq!(land_count(&grid), 64);
    }

    #[test]
    fn zero_coefficient_keeps_only_landlocked_cells() {
        let mut grid = Grid::new(5, Faction::XinXi);
        for cell in 0..grid.len() {
            grid.set_terrain(cell, Terrain::Ground);
        }
        grid.set_terrain(0, Terrain::Ocean);
        smooth_land(&mut grid, 1, 0.0);

        // Всё, что касается угловой клетки, уходит под воду
        for cell in grid.square(0, 1) {
            assert_eq!(grid.terrain(cell), Terrain::Ocean);
        }
        assert_eq!(land_count(&grid), 25 - 4);
    }

    #[test]
    fn update_is_simultaneous() {
        // Одиночная суша в центре 3×3 океана: 8/9 воды > 0.5, клетка тонет,
        // но соседи решают по исходному состоянию и тоже остаются водой
        let mut grid = Grid::new(3, Faction::XinXi);
        grid.set_terrain(4, Terrain::Ground);
        smooth_land(&mut grid, 1, 0.5);
        assert_eq!(land_count(&grid), 0);

        // Половина суши: клетки с долей воды ≤ 0.5 становятся сушей одновременно
        let mut grid = Grid::new(4, Faction::XinXi);
        for cell in 0..8 {
            grid.set_terrain(cell, Terrain::Ground);
        }
        smooth_land(&mut grid, 1, 0.5);
        for col in 0..4 {
            assert_eq!(grid.terrain(grid.index(0, col)), Terrain::Ground);
            assert_eq!(grid.terrain(grid.index(3, col)), Terrain::Ocean);
        }
    }
}
