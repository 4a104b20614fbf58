// src/grid.rs
//! Квадратная сетка клеток и запросы окрестностей
//!
//! Клетка адресуется парой `(row, col)` или плоским индексом `row * size + col`.
//! Сетка не зацикливается: соседи за пределами карты просто отбрасываются,
//! а запрос с индексом вне карты возвращает пустую окрестность.
//!
//! Метрики:
//! - `square` и `distance` — Чебышёв (квадрат `(2r+1)×(2r+1)`),
//! - `disk` и `ring` — округлённое евклидово расстояние,
//! - `cross` — четыре ортогональных соседа.
//!
//! Все окрестности возвращаются в построчном порядке, от этого зависит
//! воспроизводимость генерации.

use crate::faction::Faction;
use crate::tile::{Terrain, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Создаёт сетку, целиком покрытую океаном
    #[must_use]
    pub fn new(size: usize, placeholder: Faction) -> Self {
        Self {
            size,
            tiles: vec![Tile::ocean(placeholder); size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    #[must_use]
    pub fn tile(&self, idx: usize) -> &Tile {
        &self.tiles[idx]
    }

    pub fn tile_mut(&mut self, idx: usize) -> &mut Tile {
        &mut self.tiles[idx]
    }

    #[must_use]
    pub fn terrain(&self, idx: usize) -> Terrain {
        self.tiles[idx].terrain
    }

    pub fn set_terrain(&mut self, idx: usize, terrain: Terrain) {
        self.tiles[idx].terrain = terrain;
    }

    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[must_use]
    pub fn row_col(&self, idx: usize) -> (usize, usize) {
        (idx / self.size, idx % self.size)
    }

    /// Клетка лежит на внешнем кольце карты
    #[must_use]
    pub fn is_border(&self, idx: usize) -> bool {
        let (row, col) = self.row_col(idx);
        row == 0 || col == 0 || row + 1 == self.size || col + 1 == self.size
    }

    /// Расстояние Чебышёва между двумя клетками
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> usize {
        let (ar, ac) = self.row_col(a);
        let (br, bc) = self.row_col(b);
        ar.abs_diff(br).max(ac.abs_diff(bc))
    }

    /// Все клетки на расстоянии Чебышёва не больше `radius`, включая центр
    #[must_use]
    pub fn square(&self, idx: usize, radius: usize) -> Vec<usize> {
        self.collect_around(idx, radius, |_, _| true)
    }

    /// Все клетки с округлённым евклидовым расстоянием не больше `radius`, включая центр
    #[must_use]
    pub fn disk(&self, idx: usize, radius: usize) -> Vec<usize> {
        self.collect_around(idx, radius, |dr, dc| {
            let dist = ((dr * dr + dc * dc) as f64).sqrt().round();
            dist <= radius as f64
        })
    }

    /// `disk` без центральной клетки
    #[must_use]
    pub fn ring(&self, idx: usize, radius: usize) -> Vec<usize> {
        let mut cells = self.disk(idx, radius);
        cells.retain(|&cell| cell != idx);
        cells
    }

    /// Ортогональные соседи: верх, лево, право, низ
    #[must_use]
    pub fn cross(&self, idx: usize) -> Vec<usize> {
        self.collect_around(idx, 1, |dr, dc| dr.abs() + dc.abs() == 1)
    }

    fn collect_around<F>(&self, idx: usize, radius: usize, keep: F) -> Vec<usize>
    where
        F: Fn(i64, i64) -> bool,
    {
        if idx >= self.tiles.len() {
            return Vec::new();
        }

        let (row, col) = self.row_col(idx);
        let (row, col) = (row as i64, col as i64);
        let size = self.size as i64;
        let r = radius as i64;

        let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        for dr in -r..=r {
            let nr = row + dr;
            if nr < 0 || nr >= size {
                continue;
            }
            for dc in -r..=r {
                let nc = col + dc;
                if nc < 0 || nc >= size || !keep(dr, dc) {
                    continue;
                }
                cells.push((nr * size + nc) as usize);
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize) -> Grid {
        Grid::new(size, Faction::XinXi)
    }

    #[test]
    fn square_is_clipped_at_corners() {
        let g = grid(5);
        assert_eq!(g.square(0, 1), vec![0, 1, 5, 6]);
        assert_eq!(g.square(g.index(2, 2), 1).len(), 9);
        assert_eq!(g.square(g.index(2, 2), 2).len(), 25);
    }

    #[test]
    fn disk_of_radius_one_contains_diagonals() {
        let g = grid(5);
        let centre = g.index(2, 2);
        assert_eq!(g.disk(centre, 1), g.square(centre, 1));
    }

    #[test]
    fn disk_of_radius_two_drops_far_corners() {
        let g = grid(7);
        let centre = g.index(3, 3);
        let disk = g.disk(centre, 2);
        assert_eq!(disk.len(), 21);
        assert!(!disk.contains(&g.index(1, 1)));
        assert!(disk.contains(&g.index(1, 2)));
        assert!(disk.contains(&g.index(3, 5)));
    }

    #[test]
    fn ring_excludes_centre() {
        let g = grid(5);
        let centre = g.index(2, 2);
        let ring = g.ring(centre, 1);
        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&centre));
    }

    #[test]
    fn cross_has_up_left_right_down_order() {
        let g = grid(4);
        let idx = g.index(1, 1);
        assert_eq!(
            g.cross(idx),
            vec![g.index(0, 1), g.index(1, 0), g.index(1, 2), g.index(2, 1)]
        );
        assert_eq!(g.cross(0), vec![1, 4]);
    }

    #[test]
    fn out_of_range_index_has_no_neighbours() {
        let g = grid(3);
        assert!(g.square(9, 1).is_empty());
        assert!(g.disk(100, 2).is_empty());
        assert!(g.cross(9).is_empty());
    }

    #[test]
    fn distance_is_chebyshev() {
        let g = grid(10);
        assert_eq!(g.distance(g.index(0, 0), g.index(3, 1)), 3);
        assert_eq!(g.distance(g.index(4, 4), g.index(4, 4)), 0);
        assert_eq!(g.distance(g.index(9, 0), g.index(0, 9)), 9);
    }

    #[test]
    fn border_ring_detection() {
        let g = grid(4);
        let border: Vec<usize> = (0..g.len()).filter(|&i| g.is_border(i)).collect();
        assert_eq!(border.len(), 12);
        assert!(!g.is_border(g.index(1, 2)));
    }
}
