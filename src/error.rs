use thiserror::Error;

use crate::faction::Faction;

/// Ошибки генерации карты
///
/// Все ошибки конфигурации обнаруживаются до начала работы с сеткой.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("map size {size} is too small (minimum {min})")]
    SizeTooSmall { size: usize, min: usize },

    #[error("at least one faction is required")]
    NoFactions,

    #[error("faction {0} is listed more than once")]
    DuplicateFaction(Faction),

    #[error("{factions} factions do not fit on a {size}x{size} map (at most {max})")]
    TooManyFactions {
        factions: usize,
        size: usize,
        max: usize,
    },

    #[error("at least one faction must be able to expand its territory")]
    NoExpandingFaction,

    #[error("initial land ratio must lie in [0, 1], got {0}")]
    InvalidLandRatio(f64),

    #[error("land coefficient must be a finite non-negative number, got {0}")]
    InvalidLandCoefficient(f64),

    #[error("unknown faction '{0}'")]
    UnknownFaction(String),

    #[error("territory growth stalled with {remaining} unassigned tiles")]
    TerritoryStalled { remaining: usize },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
