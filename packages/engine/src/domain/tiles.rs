use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A board coordinate. Immutable once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub x: u8,
    pub y: u8,
}

impl Tile {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 4-connected neighbors that fall inside a `width` x `height` board.
    pub fn neighbors(self, width: u8, height: u8) -> Vec<Tile> {
        let mut out = Vec::with_capacity(4);
        if self.x > 0 {
            out.push(Tile::new(self.x - 1, self.y));
        }
        if self.x + 1 < width {
            out.push(Tile::new(self.x + 1, self.y));
        }
        if self.y > 0 {
            out.push(Tile::new(self.x, self.y - 1));
        }
        if self.y + 1 < height {
            out.push(Tile::new(self.x, self.y + 1));
        }
        out
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.x, self.y)
    }
}
