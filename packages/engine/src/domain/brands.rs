use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The seven fixed company identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brand {
    Tower,
    Luxor,
    Worldwide,
    American,
    Festival,
    Imperial,
    Continental,
}

impl Brand {
    pub const ALL: [Brand; 7] = [
        Brand::Tower,
        Brand::Luxor,
        Brand::Worldwide,
        Brand::American,
        Brand::Festival,
        Brand::Imperial,
        Brand::Continental,
    ];

    /// Fixed pricing-tier contribution of this brand.
    pub const fn tier_bonus(self) -> u8 {
        match self {
            Brand::Tower | Brand::Luxor => 0,
            Brand::Worldwide | Brand::American | Brand::Festival => 1,
            Brand::Imperial | Brand::Continental => 2,
        }
    }
}

impl Display for Brand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Brand::Tower => "Tower",
            Brand::Luxor => "Luxor",
            Brand::Worldwide => "Worldwide",
            Brand::American => "American",
            Brand::Festival => "Festival",
            Brand::Imperial => "Imperial",
            Brand::Continental => "Continental",
        };
        write!(f, "{name}")
    }
}

/// Per-brand share counts, used for both player holdings and the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareTable([u8; 7]);

impl ShareTable {
    pub const fn zero() -> Self {
        Self([0; 7])
    }

    /// Table with `n` shares of every brand.
    pub const fn filled(n: u8) -> Self {
        Self([n; 7])
    }

    pub fn count(&self, brand: Brand) -> u8 {
        self.0[brand as usize]
    }

    pub fn add(&mut self, brand: Brand, n: u8) {
        self.0[brand as usize] += n;
    }

    /// Callers validate sufficiency first; shortfall here is a defect.
    pub fn remove(&mut self, brand: Brand, n: u8) {
        debug_assert!(self.0[brand as usize] >= n, "share table underflow");
        self.0[brand as usize] -= n;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Brand, u8)> + '_ {
        Brand::ALL.iter().map(move |&b| (b, self.0[b as usize]))
    }
}
