pub mod capital;
pub mod config;
pub mod error;
pub mod faction;
pub mod generator;
pub mod grid;
pub mod guarantee;
pub mod land;
pub mod resource;
pub mod settlement;
pub mod terrain;
pub mod territory;
pub mod tile;

pub use config::{GeneralRates, GenerationParams, LandCoefficient};
pub use error::GenerationError;
pub use faction::Faction;
pub use generator::{GeneratedMap, generate, generate_batch};
pub use grid::Grid;
pub use tile::{Feature, Terrain, Tile};
