//! Domain layer: pure game rules, no I/O.

pub mod actions;
pub mod brands;
pub mod chains;
pub mod dealing;
pub mod placement;
pub mod rules;
pub mod setup;
pub mod snapshot;
pub mod state;
pub mod stocks;
pub mod tiles;
pub mod turns;

#[cfg(test)]
mod tests_props_economy;

// Re-exports for ergonomics
pub use brands::{Brand, ShareTable};
pub use chains::{Chain, ChainId};
pub use dealing::{TileBag, TileSource};
pub use placement::{place_tile, PlaceTileResult};
pub use state::{GameState, Money, Phase, PlayerId};
pub use tiles::Tile;
pub use turns::TurnAdvance;
