use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::config::GameConfig;
use crate::domain::brands::{Brand, ShareTable};
use crate::domain::chains::{Chain, ChainId};
use crate::domain::tiles::Tile;

pub type PlayerId = u8;
pub type Money = u32;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The acting player must place a tile (or skip).
    PlaceTile,
    /// A shareholder must settle their stake in an acquired brand.
    ResolveAcquisition,
    /// The turn-holder may buy shares.
    BuyStock,
    /// Terminal; standings are final.
    GameOver,
}

/// Frozen terms of one acquisition, captured when the merge resolves.
///
/// `price` is the acquired chain's share price at merge time; every
/// resolution of this acquisition sells at that price regardless of what
/// happens to the board afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTerms {
    pub acquirer: Brand,
    pub acquiree: Brand,
    pub price: Money,
}

/// One shareholder's pending decision after an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResolution {
    pub player: PlayerId,
    pub terms: ResolutionTerms,
}

/// What the acting player is currently being asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum ActionDetails {
    /// Sell/trade decision owed for an acquired brand.
    ResolveAcquisition(ResolutionTerms),
    /// Final standings, best cash first.
    FinalStandings(Vec<PlayerId>),
}

/// Entire game container, sufficient for every pure rules operation.
///
/// Mutated in place by accepted actions; callers persist it wholesale (it
/// round-trips through serde) and discard it when an action errors.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Parameters fixed at creation.
    pub config: GameConfig,
    /// False while players are still joining.
    pub started: bool,
    /// Row-major cells; index = y * width + x.
    pub grid: Vec<Option<ChainId>>,
    /// Live chains by id. Merges retire ids and allocate fresh ones.
    #[serde_as(as = "Vec<(_, _)>")]
    pub chains: BTreeMap<ChainId, Chain>,
    /// Next chain id to allocate; never decreases.
    pub next_chain_id: u32,
    /// Turn order. Join order until `start_game` shuffles it, fixed after.
    pub player_order: Vec<PlayerId>,
    /// Cash per player, indexed by PlayerId.
    pub cash: Vec<Money>,
    /// Share holdings per player, indexed by PlayerId.
    pub holdings: Vec<ShareTable>,
    /// Undistributed shares per brand.
    pub pool: ShareTable,
    /// Brands currently driving a chain, kept sorted.
    pub active_brands: Vec<Brand>,
    /// Brands available to found, kept sorted.
    pub inactive_brands: Vec<Brand>,
    pub phase: Phase,
    /// Player whose turn the current placement belongs to.
    /// None before start and once the game is over.
    pub current_turn_player: Option<PlayerId>,
    /// Player expected to act right now. Differs from the turn-holder while
    /// acquisition resolutions are being worked off.
    pub current_action_player: Option<PlayerId>,
    pub action_details: Option<ActionDetails>,
    /// Pending acquisition decisions. Pushed back in resolution order,
    /// popped front, so earlier entries resolve first.
    pub resolution_queue: VecDeque<PendingResolution>,
    /// Tiles left in the external tile source, for display.
    pub tiles_remaining: u32,
}

impl GameState {
    /// Fresh lobby state: empty board, full pools, every brand foundable.
    pub fn new(config: GameConfig) -> Self {
        let cells = config.cell_count();
        let pool = ShareTable::filled(config.shares_per_brand);
        Self {
            config,
            started: false,
            grid: vec![None; cells],
            chains: BTreeMap::new(),
            next_chain_id: 0,
            player_order: Vec::new(),
            cash: Vec::new(),
            holdings: Vec::new(),
            pool,
            active_brands: Vec::new(),
            inactive_brands: Brand::ALL.to_vec(),
            phase: Phase::PlaceTile,
            current_turn_player: None,
            current_action_player: None,
            action_details: None,
            resolution_queue: VecDeque::new(),
            tiles_remaining: 0,
        }
    }

    pub fn player_count(&self) -> usize {
        self.cash.len()
    }

    pub fn in_bounds(&self, tile: Tile) -> bool {
        tile.x < self.config.width && tile.y < self.config.height
    }

    #[inline]
    fn cell_index(&self, tile: Tile) -> usize {
        debug_assert!(self.in_bounds(tile));
        tile.y as usize * self.config.width as usize + tile.x as usize
    }

    pub fn cell(&self, tile: Tile) -> Option<ChainId> {
        self.grid[self.cell_index(tile)]
    }

    pub fn set_cell(&mut self, tile: Tile, id: ChainId) {
        let idx = self.cell_index(tile);
        self.grid[idx] = Some(id);
    }

    pub fn allocate_chain_id(&mut self) -> ChainId {
        let id = ChainId(self.next_chain_id);
        self.next_chain_id += 1;
        id
    }

    /// Chain for a live id. A dangling id is a defect.
    pub fn chain(&self, id: ChainId) -> &Chain {
        &self.chains[&id]
    }

    pub(crate) fn chain_mut(&mut self, id: ChainId) -> &mut Chain {
        match self.chains.get_mut(&id) {
            Some(chain) => chain,
            None => panic!("chain {id} is not live"),
        }
    }

    pub fn chain_id_by_brand(&self, brand: Brand) -> Option<ChainId> {
        self.chains
            .iter()
            .find(|(_, chain)| chain.brand == Some(brand))
            .map(|(&id, _)| id)
    }

    /// Branded chains in id (creation) order.
    pub fn branded_chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains
            .iter()
            .filter(|(_, chain)| chain.brand.is_some())
            .map(|(&id, chain)| (id, chain))
    }

    pub fn cash_of(&self, player: PlayerId) -> Money {
        self.cash[player as usize]
    }

    pub fn holdings_of(&self, player: PlayerId) -> &ShareTable {
        &self.holdings[player as usize]
    }

    /// Move a founded brand from the inactive to the active list.
    pub(crate) fn activate_brand(&mut self, brand: Brand) {
        let pos = self
            .inactive_brands
            .iter()
            .position(|&b| b == brand)
            .unwrap_or_else(|| panic!("brand {brand} founded while not inactive"));
        self.inactive_brands.remove(pos);
        self.active_brands.push(brand);
        self.active_brands.sort();
    }

    /// Move an acquired brand back to the inactive list; it can be founded
    /// again later.
    pub(crate) fn deactivate_brand(&mut self, brand: Brand) {
        let pos = self
            .active_brands
            .iter()
            .position(|&b| b == brand)
            .unwrap_or_else(|| panic!("brand {brand} acquired while not active"));
        self.active_brands.remove(pos);
        self.inactive_brands.push(brand);
        self.inactive_brands.sort();
    }
}

/// True when no player id repeats in `order`.
pub fn order_is_unique(order: &[PlayerId]) -> bool {
    order
        .iter()
        .enumerate()
        .all(|(i, p)| !order[..i].contains(p))
}

fn position_of(order: &[PlayerId], player: PlayerId) -> usize {
    debug_assert!(order_is_unique(order), "turn order must be duplicate-free");
    match order.iter().position(|&p| p == player) {
        Some(pos) => pos,
        None => panic!("player {player} missing from turn order"),
    }
}

/// Next player in fixed turn order, wrapping.
#[inline]
pub fn next_in_order(order: &[PlayerId], current: PlayerId) -> PlayerId {
    let pos = position_of(order, current);
    order[(pos + 1) % order.len()]
}

/// One full rotation of the turn order, starting with the player immediately
/// after `current` and ending with `current` itself.
pub fn rotation_after(order: &[PlayerId], current: PlayerId) -> Vec<PlayerId> {
    let pos = position_of(order, current);
    (1..=order.len())
        .map(|step| order[(pos + step) % order.len()])
        .collect()
}
