use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::brands::Brand;
use crate::domain::tiles::Tile;

/// Handle into the board's chain table.
///
/// Ids are allocated from a monotone counter and retired on merge; a retired
/// id is never reused. Chains are compared by id, never by contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u32);

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// A connected group of placed tiles, optionally carrying a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub tiles: Vec<Tile>,
    pub brand: Option<Brand>,
}

impl Chain {
    pub fn single(tile: Tile) -> Self {
        Self {
            tiles: vec![tile],
            brand: None,
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Locked chains can absorb others but can never be absorbed.
    pub fn is_locked(&self, lock_threshold: u8) -> bool {
        self.brand.is_some() && self.tiles.len() >= lock_threshold as usize
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }
}
