// src/settlement.rs
//! Карта покрытия поселениями и размещение деревень
//!
//! Уровни покрытия:
//! - `-1` — клетка непригодна для деревни (вода, горы, край карты),
//! - `0` — пригодна и ещё ничем не покрыта,
//! - `1` — в двух кольцах от поселения,
//! - `2` — в одном кольце от поселения,
//! - `3` — занята поселением.
//!
//! Деревни ставятся, пока остаются клетки уровня 0. Между любыми двумя
//! поселениями остаётся буфер, и каждая пригодная клетка оказывается не дальше
//! двух колец от какого-нибудь поселения.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::grid::Grid;
use crate::tile::Terrain;

pub const INELIGIBLE: i8 = -1;
pub const ELIGIBLE: i8 = 0;
pub const NEAR: i8 = 1;
pub const CLOSE: i8 = 2;
pub const OCCUPIED: i8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageMap {
    pub size: usize,
    pub levels: Vec<i8>,
}

impl CoverageMap {
    /// Начальная карта: вода, горы и край карты непригодны
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let levels = (0..grid.len())
            .map(|cell| {
                let terrain = grid.terrain(cell);
                if terrain.is_water() || terrain == Terrain::Mountain || grid.is_border(cell) {
                    INELIGIBLE
                } else {
                    ELIGIBLE
                }
            })
            .collect();
        Self {
            size: grid.size(),
            levels,
        }
    }

    #[must_use]
    pub fn level(&self, cell: usize) -> i8 {
        self.levels[cell]
    }

    /// Поднимает уровень клеток в радиусе не ниже `level`
    pub fn raise(&mut self, grid: &Grid, cell: usize, radius: usize, level: i8) {
        for n in grid.disk(cell, radius) {
            self.levels[n] = self.levels[n].max(level);
        }
    }

    /// Отмечает поселение и его окрестности
    pub fn settle(&mut self, grid: &Grid, cell: usize) {
        self.levels[cell] = OCCUPIED;
        self.raise(grid, cell, 1, CLOSE);
        self.raise(grid, cell, 2, NEAR);
    }

    /// Клетки заданного уровня в построчном порядке
    #[must_use]
    pub fn cells_at(&self, level: i8) -> Vec<usize> {
        (0..self.levels.len())
            .filter(|&cell| self.levels[cell] == level)
            .collect()
    }
}

/// Результат планирования поселений
#[derive(Debug, Clone)]
pub struct SettlementPlan {
    pub coverage: CoverageMap,
    /// Деревни в порядке размещения
    pub villages: Vec<usize>,
}

/// Строит карту покрытия от столиц и расставляет деревни, пока есть непокрытые клетки
pub fn plan_settlements<R: Rng + ?Sized>(
    grid: &Grid,
    capitals: &[usize],
    rng: &mut R,
) -> SettlementPlan {
    let mut coverage = CoverageMap::from_grid(grid);
    for &capital in capitals {
        coverage.settle(grid, capital);
    }

    let mut villages = Vec::new();
    loop {
        let open = coverage.cells_at(ELIGIBLE);
        let Some(&village) = open.choose(rng) else {
            break;
        };
        coverage.settle(grid, village);
        villages.push(village);
    }

    SettlementPlan { coverage, villages }
}
