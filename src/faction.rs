// src/faction.rs
//! Фракции (племена) и их таблицы предрасположенности
//!
//! Каждая фракция имеет статический профиль множителей к базовым вероятностям
//! появления рельефа и ресурсов. Профили хранятся в двумерной таблице
//! `AFFINITY[вид][фракция]`, индексируемой перечислениями, поэтому добавление
//! фракции без заполнения всех строк таблицы не скомпилируется.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Известные фракции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    XinXi,
    Imperius,
    Bardur,
    Oumaji,
    Kickoo,
    Hoodrick,
    Luxidoor,
    Vengir,
    Zebasi,
    AiMo,
    Quetzali,
    Yadakk,
    Aquarion,
    Elyrion,
    Cymanti,
    /// Нейтральная ледяная фракция: не расширяет территорию
    Polaris,
}

/// Вид рельефа или ресурса, для которого у фракции есть множитель
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// Вероятность спонтанного водоёма (используется без базовой ставки)
    Water,
    Forest,
    Mountain,
    Metal,
    Fruit,
    Crop,
    Spore,
    Game,
    Fish,
    Starfish,
}

const FACTION_COUNT: usize = Faction::ALL.len();
const AFFINITY_COUNT: usize = 10;

// Столбцы в порядке `Faction::ALL`
#[rustfmt::skip]
const AFFINITY: [[f64; FACTION_COUNT]; AFFINITY_COUNT] = [
    // XinXi Imper Bardur Oumaji Kickoo Hoodr  Luxid  Vengir Zebasi AiMo   Quetz  Yadakk Aquar  Elyr   Cyman  Polaris
    [0.0,  0.0,  0.0,  0.0,  0.4,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  1.5,  0.0,  1.0,  0.0], // Water
    [1.0,  1.0,  1.0,  0.2,  1.0,  1.5,  1.0,  1.0,  0.5,  1.0,  1.0,  0.5,  0.5,  1.0,  1.0,  1.0], // Forest
    [1.5,  1.0,  1.0,  0.5,  0.5,  0.5,  1.0,  1.0,  0.5,  1.5,  1.0,  0.5,  1.0,  0.5,  1.0,  1.0], // Mountain
    [1.5,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  2.0,  1.0,  1.0,  0.1,  1.0,  1.0,  1.0,  1.0,  1.0], // Metal
    [1.0,  2.0,  1.5,  1.0,  1.0,  1.0,  1.0,  0.1,  0.5,  1.0,  2.0,  1.5,  1.0,  1.0,  1.0,  1.0], // Fruit
    [1.0,  1.0,  0.1,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  0.1,  0.1,  1.0,  1.0,  1.5,  0.0,  1.0], // Crop
    [0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  1.2,  0.0], // Spore
    [1.0,  0.5,  1.0,  0.2,  1.0,  1.0,  1.5,  0.1,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0], // Game
    [1.0,  1.0,  1.0,  1.0,  1.5,  1.0,  1.0,  0.1,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0], // Fish
    [1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0], // Starfish
];

impl Faction {
    pub const ALL: [Faction; 16] = [
        Faction::XinXi,
        Faction::Imperius,
        Faction::Bardur,
        Faction::Oumaji,
        Faction::Kickoo,
        Faction::Hoodrick,
        Faction::Luxidoor,
        Faction::Vengir,
        Faction::Zebasi,
        Faction::AiMo,
        Faction::Quetzali,
        Faction::Yadakk,
        Faction::Aquarion,
        Faction::Elyrion,
        Faction::Cymanti,
        Faction::Polaris,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Faction::XinXi => "XinXi",
            Faction::Imperius => "Imperius",
            Faction::Bardur => "Bardur",
            Faction::Oumaji => "Oumaji",
            Faction::Kickoo => "Kickoo",
            Faction::Hoodrick => "Hoodrick",
            Faction::Luxidoor => "Luxidoor",
            Faction::Vengir => "Vengir",
            Faction::Zebasi => "Zebasi",
            Faction::AiMo => "AiMo",
            Faction::Quetzali => "Quetzali",
            Faction::Yadakk => "Yadakk",
            Faction::Aquarion => "Aquarion",
            Faction::Elyrion => "Elyrion",
            Faction::Cymanti => "Cymanti",
            Faction::Polaris => "Polaris",
        }
    }

    /// Множитель фракции для заданного вида рельефа/ресурса
    #[must_use]
    pub fn affinity(self, kind: Affinity) -> f64 {
        AFFINITY[kind as usize][self as usize]
    }

    /// Участвует ли фракция в росте территории
    #[must_use]
    pub fn expands(self) -> bool {
        self != Faction::Polaris
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Faction {
    type Err = GenerationError;

    /// Имя сравнивается без учёта регистра: `vengir`, `Vengir`, `VENGIR`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Faction::ALL
            .into_iter()
            .find(|faction| faction.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GenerationError::UnknownFaction(name.to_string()))
    }
}
