//! Public snapshot API for observing game state without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::brands::{Brand, ShareTable};
use crate::domain::chains::ChainId;
use crate::domain::state::{ActionDetails, GameState, Money, Phase, PlayerId, ResolutionTerms};
use crate::domain::stocks::chain_price;

/// One occupied cell as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPublic {
    pub chain: ChainId,
    pub brand: Option<Brand>,
}

/// Public info about one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub player: PlayerId,
    pub cash: Money,
    pub holdings: ShareTable,
}

/// Public info about one brand's market position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPublic {
    pub brand: Brand,
    /// Shares left in the pool.
    pub pool: u8,
    /// Tile count of the brand's chain, when it is on the board.
    pub chain_size: Option<u16>,
    /// Current share price, when the brand is on the board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    pub locked: bool,
}

/// Game-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHeader {
    pub width: u8,
    pub height: u8,
    /// Row-major cells; index = y * width + x.
    pub cells: Vec<Option<CellPublic>>,
    pub players: Vec<PlayerPublic>,
    /// All seven brands, board order.
    pub brands: Vec<BrandPublic>,
    pub tiles_remaining: u32,
    pub turn_player: Option<PlayerId>,
}

/// Top-level snapshot combining header and phase-specific data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: GameHeader,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    /// Players are still joining.
    Lobby,
    PlaceTile { to_act: PlayerId },
    ResolveAcquisition { to_act: PlayerId, terms: ResolutionTerms },
    BuyStock { to_act: PlayerId, purchase_limit: u8 },
    GameOver { standings: Vec<PlayerId> },
}

/// Build the public view of a game state.
pub fn snapshot(state: &GameState) -> GameSnapshot {
    let cells = state
        .grid
        .iter()
        .map(|cell| {
            cell.map(|id| CellPublic {
                chain: id,
                brand: state.chain(id).brand,
            })
        })
        .collect();

    let players = (0..state.player_count() as PlayerId)
        .map(|player| PlayerPublic {
            player,
            cash: state.cash_of(player),
            holdings: *state.holdings_of(player),
        })
        .collect();

    let brands = Brand::ALL
        .iter()
        .map(|&brand| {
            let chain = state.chain_id_by_brand(brand).map(|id| state.chain(id));
            BrandPublic {
                brand,
                pool: state.pool.count(brand),
                chain_size: chain.map(|c| c.size() as u16),
                price: chain.map(chain_price),
                locked: chain.is_some_and(|c| c.is_locked(state.config.lock_threshold)),
            }
        })
        .collect();

    let phase = build_phase_snapshot(state);

    GameSnapshot {
        game: GameHeader {
            width: state.config.width,
            height: state.config.height,
            cells,
            players,
            brands,
            tiles_remaining: state.tiles_remaining,
            turn_player: state.current_turn_player,
        },
        phase,
    }
}

fn build_phase_snapshot(state: &GameState) -> PhaseSnapshot {
    if !state.started {
        return PhaseSnapshot::Lobby;
    }
    match state.phase {
        Phase::PlaceTile => PhaseSnapshot::PlaceTile {
            to_act: acting(state),
        },
        Phase::ResolveAcquisition => {
            let terms = match &state.action_details {
                Some(ActionDetails::ResolveAcquisition(terms)) => *terms,
                other => panic!("resolve phase without frozen terms: {other:?}"),
            };
            PhaseSnapshot::ResolveAcquisition {
                to_act: acting(state),
                terms,
            }
        }
        Phase::BuyStock => PhaseSnapshot::BuyStock {
            to_act: acting(state),
            purchase_limit: state.config.purchase_limit,
        },
        Phase::GameOver => {
            let standings = match &state.action_details {
                Some(ActionDetails::FinalStandings(standings)) => standings.clone(),
                other => panic!("game over without standings: {other:?}"),
            };
            PhaseSnapshot::GameOver { standings }
        }
    }
}

fn acting(state: &GameState) -> PlayerId {
    match state.current_action_player {
        Some(player) => player,
        None => panic!("started game in {:?} with no acting player", state.phase),
    }
}
