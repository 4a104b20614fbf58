// src/generator.rs
//! Полный конвейер генерации карты
//!
//! Этапы выполняются строго по порядку и используют один генератор случайных
//! чисел `ChaCha8Rng`. Один и тот же сид с теми же параметрами даёт побитово
//! одинаковую карту, поэтому порядок и число бросков на каждом этапе — часть
//! контракта:
//!
//! 1. Суша: засев и сглаживание (`land`)
//! 2. Столицы (`capital`)
//! 3. Территории (`territory`)
//! 4. Лес, горы, водоёмы, береговая линия (`terrain`)
//! 5. Карта покрытия и деревни (`settlement`)
//! 6. Ресурсы и руины (`resource`)
//! 7. Гарантии фракций (`guarantee`)

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::capital::place_capitals;
use crate::config::GenerationParams;
use crate::error::GenerationError;
use crate::faction::Faction;
use crate::grid::Grid;
use crate::guarantee::apply_guarantees;
use crate::land::shape_land;
use crate::resource::{place_resources, place_ruins};
use crate::settlement::plan_settlements;
use crate::terrain::classify_terrain;
use crate::territory::grow_territory;
use crate::tile::{Feature, Terrain, Tile};

/// Готовая карта: неизменяемый снимок клеток в построчном порядке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMap {
    pub size: usize,
    /// Фактически использованный сид (случайный, если в параметрах его не было)
    pub seed: u64,
    /// Столицы в порядке фракций
    pub capitals: Vec<Capital>,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capital {
    pub faction: Faction,
    pub index: usize,
}

impl GeneratedMap {
    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.tiles[row * self.size + col]
    }

    #[must_use]
    pub fn feature_count(&self, feature: Feature) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.feature == Some(feature))
            .count()
    }

    #[must_use]
    pub fn terrain_count(&self, terrain: Terrain) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.terrain == terrain)
            .count()
    }

    /// Число клеток, которыми сейчас владеет фракция
    #[must_use]
    pub fn territory_size(&self, faction: Faction) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.faction == faction)
            .count()
    }

    #[must_use]
    pub fn capital_of(&self, faction: Faction) -> Option<usize> {
        self.capitals
            .iter()
            .find(|capital| capital.faction == faction)
            .map(|capital| capital.index)
    }
}

/// Генерирует карту по параметрам
///
/// Параметры проверяются до начала работы с сеткой; некорректная конфигурация
/// возвращается как ошибка, а не как частично заполненная карта.
pub fn generate(params: &GenerationParams) -> Result<GeneratedMap, GenerationError> {
    params.validate()?;

    let seed = params.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let factions = &params.factions;
    let land_coefficient = params.land_coefficient.value(params.relief);

    info!(
        size = params.size,
        seed,
        factions = factions.len(),
        land_coefficient,
        "generating map"
    );

    let mut grid = Grid::new(params.size, factions[0]);

    // === 1. Суша ===
    let land = shape_land(
        &mut grid,
        params.initial_land,
        params.smoothing,
        land_coefficient,
        &mut rng,
    );
    debug!(land, "land shaped");

    // === 2. Столицы ===
    let capitals = place_capitals(&mut grid, factions, &mut rng);
    debug!(capitals = capitals.len(), "capitals placed");

    // === 3. Территории ===
    grow_territory(&mut grid, factions, &capitals, &mut rng)?;
    for &faction in factions {
        debug!(
            %faction,
            tiles = count_owned(&grid, faction),
            "territory grown"
        );
    }

    // === 4. Рельеф ===
    classify_terrain(&mut grid, &params.rates, &mut rng);
    debug!(
        forest = count_terrain(&grid, Terrain::Forest),
        mountain = count_terrain(&grid, Terrain::Mountain),
        water = count_terrain(&grid, Terrain::Water),
        "terrain classified"
    );

    // === 5. Поселения ===
    let plan = plan_settlements(&grid, &capitals, &mut rng);
    let mut coverage = plan.coverage;
    debug!(villages = plan.villages.len(), "settlements planned");

    // === 6. Ресурсы и руины ===
    place_resources(&mut grid, &coverage, &params.rates, &mut rng);
    let ruins = place_ruins(&mut grid, &mut coverage, &mut rng);
    debug!(ruins = ruins.len(), "resources and ruins placed");

    // === 7. Гарантии фракций ===
    let guaranteed = apply_guarantees(&mut grid, &capitals, &mut rng);
    debug!(guaranteed, "faction guarantees applied");

    let map = GeneratedMap {
        size: params.size,
        seed,
        capitals: factions
            .iter()
            .zip(&capitals)
            .map(|(&faction, &index)| Capital { faction, index })
            .collect(),
        tiles: grid.into_tiles(),
    };

    info!(
        seed,
        villages = map.feature_count(Feature::Village),
        ruins = map.feature_count(Feature::Ruin),
        "map generated"
    );
    Ok(map)
}

fn count_owned(grid: &Grid, faction: Faction) -> usize {
    grid.tiles()
        .iter()
        .filter(|tile| tile.faction == faction)
        .count()
}

fn count_terrain(grid: &Grid, terrain: Terrain) -> usize {
    grid.tiles()
        .iter()
        .filter(|tile| tile.terrain == terrain)
        .count()
}

/// Генерирует `count` карт с сидами `seed, seed + 1, …`
///
/// Карты независимы, поэтому с фичей `parallel` они строятся параллельно через rayon.
/// Без сида в параметрах базовый сид выбирается случайно.
pub fn generate_batch(
    params: &GenerationParams,
    count: usize,
) -> Result<Vec<GeneratedMap>, GenerationError> {
    params.validate()?;
    let base = params.seed.unwrap_or_else(rand::random);

    let with_seed = |i: usize| {
        let params = GenerationParams {
            seed: Some(base.wrapping_add(i as u64)),
            ..params.clone()
        };
        generate(&params)
    };

    #[cfg(feature = "parallel")]
    let maps = {
        use rayon::prelude::*;
        (0..count).into_par_iter().map(with_seed).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let maps = (0..count).map(with_seed).collect();

    maps
}
