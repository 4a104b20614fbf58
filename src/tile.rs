use serde::{Deserialize, Serialize};

use crate::faction::Faction;

/// Тип поверхности клетки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Глубокая вода
    Ocean,
    /// Мелководье у берега
    Water,
    Ground,
    Forest,
    Mountain,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Ocean,
        Terrain::Water,
        Terrain::Ground,
        Terrain::Forest,
        Terrain::Mountain,
    ];

    /// Суша в широком смысле (в том числе лес и горы)
    #[must_use]
    pub fn is_land(self) -> bool {
        matches!(self, Terrain::Ground | Terrain::Forest | Terrain::Mountain)
    }

    #[must_use]
    pub fn is_water(self) -> bool {
        matches!(self, Terrain::Ocean | Terrain::Water)
    }
}

/// Объект на клетке: поселение, руины или ресурс
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Capital,
    Village,
    Ruin,
    Fruit,
    Crop,
    Spore,
    Game,
    Fish,
    Starfish,
    Metal,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::Capital,
        Feature::Village,
        Feature::Ruin,
        Feature::Fruit,
        Feature::Crop,
        Feature::Spore,
        Feature::Game,
        Feature::Fish,
        Feature::Starfish,
        Feature::Metal,
    ];

    /// Собираемый ресурс (не поселение и не руины)
    #[must_use]
    pub fn is_resource(self) -> bool {
        !matches!(self, Feature::Capital | Feature::Village | Feature::Ruin)
    }
}

/// Одна клетка карты
///
/// `original_faction` фиксируется при росте территории и используется для всех
/// вероятностных таблиц. Поздние переназначения владельца меняют только `faction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub terrain: Terrain,
    pub feature: Option<Feature>,
    pub faction: Faction,
    pub original_faction: Faction,
}

impl Tile {
    /// Пустая океанская клетка с временным владельцем
    #[must_use]
    pub fn ocean(placeholder: Faction) -> Self {
        Self {
            terrain: Terrain::Ocean,
            feature: None,
            faction: placeholder,
            original_faction: placeholder,
        }
    }

    #[must_use]
    pub fn is_capital(&self) -> bool {
        self.feature == Some(Feature::Capital)
    }

    /// Назначает владельца вместе с фракцией для вероятностных таблиц
    pub fn claim(&mut self, faction: Faction) {
        self.faction = faction;
        self.original_faction = faction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_serializes_with_camel_case_fields() {
        let mut tile = Tile::ocean(Faction::Bardur);
        tile.terrain = Terrain::Forest;
        tile.feature = Some(Feature::Game);
        tile.faction = Faction::Polaris;

        let json = serde_json::to_value(tile).unwrap();
        assert_eq!(json["terrain"], "forest");
        assert_eq!(json["feature"], "game");
        assert_eq!(json["faction"], "Polaris");
        assert_eq!(json["originalFaction"], "Bardur");
    }

    #[test]
    fn empty_feature_is_null() {
        let json = serde_json::to_value(Tile::ocean(Faction::XinXi)).unwrap();
        assert!(json["feature"].is_null());
    }

    #[test]
    fn land_and_water_are_disjoint() {
        for terrain in Terrain::ALL {
            assert_ne!(terrain.is_land(), terrain.is_water(), "{terrain:?}");
        }
    }
}
