#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Rules engine for an Acquire-style tile-placement, stock-trading board
//! game. Pure and synchronous: the host validates identity, applies one
//! action at a time, and persists the mutated [`GameState`] wholesale.

pub mod config;
pub mod domain;
pub mod errors;

// Re-exports for public API
pub use config::GameConfig;
pub use domain::actions::{buy_action, place_action, resolve_action, skip_action, PlaceOutcome};
pub use domain::brands::{Brand, ShareTable};
pub use domain::chains::{Chain, ChainId};
pub use domain::dealing::{TileBag, TileSource};
pub use domain::placement::{place_tile, PlaceTileResult};
pub use domain::setup::{join_game, start_game, StartOutcome};
pub use domain::snapshot::{snapshot, GameSnapshot, PhaseSnapshot};
pub use domain::state::{GameState, Money, Phase, PlayerId};
pub use domain::stocks::{
    apply_majority_bonuses, award_founder_share, brand_price, buy_stock, chain_price,
    execute_purchase, handle_game_end, resolve_acquisition, sell_stock, trade_stock, BonusPayout,
};
pub use domain::tiles::Tile;
pub use domain::turns::{after_buy, after_place, after_resolve, skip_placement, TurnAdvance};
pub use errors::RuleViolation;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
