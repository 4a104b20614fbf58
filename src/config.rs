// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Размер карты и начальную долю суши
//! - Сглаживание береговой линии и коэффициент суши
//! - Список фракций и сид генератора
//! - Базовые вероятности рельефа и ресурсов
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::faction::Faction;

/// Минимальный размер карты: столицы держатся в двух клетках от края
pub const MIN_SIZE: usize = 5;

/// Отступ столиц от края карты
pub const CAPITAL_MARGIN: usize = 2;

/// Коэффициент суши для клеточного автомата сглаживания
///
/// Клетка становится сушей, если доля океана в её окрестности не превышает коэффициент.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LandCoefficient {
    /// `(0.5 + relief) / 9` — чем ниже рельеф, тем больше воды
    #[default]
    Relief,
    /// Фиксированное значение. `Fixed(1.0)` превращает всё в сушу (режим обучения)
    Fixed(f64),
}

impl LandCoefficient {
    /// Возвращает числовое значение коэффициента для заданного уровня рельефа.
    ///
    /// # Примеры
    /// ```
    /// use mapgen::config::LandCoefficient;
    /// assert_eq!(LandCoefficient::Relief.value(4), 0.5);
    /// assert_eq!(LandCoefficient::Fixed(1.0).value(4), 1.0);
    /// ```
    #[must_use]
    pub fn value(self, relief: u32) -> f64 {
        match self {
            LandCoefficient::Relief => (0.5 + f64::from(relief)) / 9.0,
            LandCoefficient::Fixed(value) => value,
        }
    }
}

/// Базовые вероятности рельефа и ресурсов
///
/// Итоговая вероятность — базовая ставка, умноженная на множитель фракции.
/// Споры используют ставку урожая (`crop`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralRates {
    #[serde(default = "default_forest_rate")]
    pub forest: f64,
    #[serde(default = "default_mountain_rate")]
    pub mountain: f64,
    #[serde(default = "default_fruit_rate")]
    pub fruit: f64,
    #[serde(default = "default_crop_rate")]
    pub crop: f64,
    #[serde(default = "default_fish_rate")]
    pub fish: f64,
    #[serde(default = "default_game_rate")]
    pub game: f64,
    #[serde(default = "default_starfish_rate")]
    pub starfish: f64,
    #[serde(default = "default_metal_rate")]
    pub metal: f64,
}

/// Ставка гор в режиме обучения (меньше непроходимых клеток)
pub const TRAINING_MOUNTAIN_RATE: f64 = 0.02;

fn default_forest_rate() -> f64 {
    0.38
}
fn default_mountain_rate() -> f64 {
    0.14
}
fn default_fruit_rate() -> f64 {
    0.18
}
fn default_crop_rate() -> f64 {
    0.18
}
fn default_fish_rate() -> f64 {
    0.50
}
fn default_game_rate() -> f64 {
    0.19
}
fn default_starfish_rate() -> f64 {
    0.40
}
fn default_metal_rate() -> f64 {
    0.50
}

impl Default for GeneralRates {
    fn default() -> Self {
        Self {
            forest: 0.38,
            mountain: 0.14,
            fruit: 0.18,
            crop: 0.18,
            fish: 0.50,
            game: 0.19,
            starfish: 0.40,
            metal: 0.50,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Сторона квадратной карты в клетках (по умолчанию 16)
    #[serde(default = "default_size")]
    pub size: usize,

    /// Начальная доля суши до сглаживания, `[0, 1]`
    #[serde(default = "default_initial_land")]
    pub initial_land: f64,

    /// Количество итераций сглаживания
    #[serde(default = "default_smoothing")]
    pub smoothing: u32,

    /// Уровень рельефа (влияет на коэффициент суши)
    #[serde(default = "default_relief")]
    pub relief: u32,

    /// Фракции в порядке размещения столиц
    #[serde(default = "default_factions")]
    pub factions: Vec<Faction>,

    /// Сид генератора случайных чисел. Без сида берётся случайный
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub land_coefficient: LandCoefficient,

    #[serde(default)]
    pub rates: GeneralRates,
}

fn default_size() -> usize {
    16
}
fn default_initial_land() -> f64 {
    0.5
}
fn default_smoothing() -> u32 {
    3
}
fn default_relief() -> u32 {
    4
}
fn default_factions() -> Vec<Faction> {
    vec![Faction::Vengir, Faction::Bardur, Faction::Oumaji]
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            size: 16,
            initial_land: 0.5,
            smoothing: 3,
            relief: 4,
            factions: default_factions(),
            seed: None,
            land_coefficient: LandCoefficient::Relief,
            rates: GeneralRates::default(),
        }
    }
}

impl GenerationParams {
    /// Параметры режима обучения: сплошная суша и редкие горы
    #[must_use]
    pub fn training() -> Self {
        Self::default().into_training()
    }

    /// Переводит параметры в режим обучения, сохраняя остальные поля
    #[must_use]
    pub fn into_training(mut self) -> Self {
        self.land_coefficient = LandCoefficient::Fixed(1.0);
        self.rates.mountain = TRAINING_MOUNTAIN_RATE;
        self
    }

    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// size = 18
    /// initial_land = 0.6
    /// factions = ["Imperius", "Kickoo"]
    /// seed = 7
    /// land_coefficient = { fixed = 1.0 }
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GenerationError> {
        Ok(toml::from_str(contents)?)
    }

    /// Наибольшее число столиц, которое гарантированно помещается на карту
    #[must_use]
    pub fn max_factions(size: usize) -> usize {
        let interior = size.saturating_sub(2 * CAPITAL_MARGIN);
        interior * interior
    }

    /// Проверяет параметры до начала генерации
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.size < MIN_SIZE {
            return Err(GenerationError::SizeTooSmall {
                size: self.size,
                min: MIN_SIZE,
            });
        }
        if !(0.0..=1.0).contains(&self.initial_land) {
            return Err(GenerationError::InvalidLandRatio(self.initial_land));
        }
        if let LandCoefficient::Fixed(value) = self.land_coefficient {
            if !value.is_finite() || value < 0.0 {
                return Err(GenerationError::InvalidLandCoefficient(value));
            }
        }
        if self.factions.is_empty() {
            return Err(GenerationError::NoFactions);
        }

        let mut seen = HashSet::new();
        for &faction in &self.factions {
            if !seen.insert(faction) {
                return Err(GenerationError::DuplicateFaction(faction));
            }
        }

        let max = Self::max_factions(self.size);
        if self.factions.len() > max {
            return Err(GenerationError::TooManyFactions {
                factions: self.factions.len(),
                size: self.size,
                max,
            });
        }
        if !self.factions.iter().any(|faction| faction.expands()) {
            return Err(GenerationError::NoExpandingFaction);
        }
        Ok(())
    }
}
