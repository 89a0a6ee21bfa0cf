//! Deterministic tile bag and the draw interface the engine consumes.

use crate::config::GameConfig;
use crate::domain::tiles::Tile;

/// Source of tiles for dealing and the per-turn replacement draw.
///
/// The engine never shuffles mid-game; it only draws. Implementations decide
/// the order once, up front.
pub trait TileSource {
    /// Next tile, or None when the source is exhausted.
    fn draw(&mut self) -> Option<Tile>;

    /// Up to `n` tiles; shorter when the source runs out.
    fn draw_many(&mut self, n: usize) -> Vec<Tile> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw() {
                Some(tile) => out.push(tile),
                None => break,
            }
        }
        out
    }

    fn remaining(&self) -> usize;
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // SplitMix64: well-distributed 64-bit generator.
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Compute largest multiple of m that fits in u64 to avoid modulo bias.
        // Values >= limit are discarded using rejection sampling.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using the deterministic RNG.
pub(crate) fn shuffle_with_seed<T>(items: &mut [T], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_range(i + 1);
        items.swap(i, j);
    }
}

/// The shared tile pool: every board coordinate exactly once, in a
/// seed-determined order.
#[derive(Debug, Clone)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// Bag over every cell of the configured board, shuffled by `seed`.
    pub fn shuffled(config: &GameConfig, seed: u64) -> Self {
        let mut tiles = Vec::with_capacity(config.cell_count());
        for x in 0..config.width {
            for y in 0..config.height {
                tiles.push(Tile::new(x, y));
            }
        }
        shuffle_with_seed(&mut tiles, seed);
        Self { tiles }
    }

    /// Scripted bag that yields `tiles` front-first, for tests.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().rev().collect(),
        }
    }
}

impl TileSource for TileBag {
    fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    fn remaining(&self) -> usize {
        self.tiles.len()
    }
}
