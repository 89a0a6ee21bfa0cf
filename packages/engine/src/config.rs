//! Per-game configuration supplied by the host application.

use serde::{Deserialize, Serialize};

use crate::domain::state::Money;

/// Tunable game parameters, fixed at game creation and stored on the state
/// so snapshots carry their own rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: u8,
    /// Board height in cells.
    pub height: u8,
    /// Tile count at which a branded chain becomes immune to acquisition.
    pub lock_threshold: u8,
    /// Chain size that permits the game to end.
    pub win_size: u8,
    /// Cash granted to each player on joining.
    pub starting_cash: Money,
    /// Shares available per brand.
    pub shares_per_brand: u8,
    /// Tiles dealt to each player at game start.
    pub tile_hand_size: u8,
    /// Minimum players required to start.
    pub min_players: u8,
    /// Maximum players allowed to join.
    pub max_players: u8,
    /// Maximum shares purchasable in one buy phase.
    pub purchase_limit: u8,
}

impl Default for GameConfig {
    /// Classic play: 12x9 board, lock at 11 tiles, win at 41, 6000 starting
    /// cash, 25 shares per brand, 6-tile hands, 2 to 6 players, 3 buys per
    /// turn.
    fn default() -> Self {
        Self {
            width: 12,
            height: 9,
            lock_threshold: 11,
            win_size: 41,
            starting_cash: 6000,
            shares_per_brand: 25,
            tile_hand_size: 6,
            min_players: 2,
            max_players: 6,
            purchase_limit: 3,
        }
    }
}

impl GameConfig {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
