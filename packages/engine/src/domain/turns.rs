//! Turn and phase sequencing.
//!
//! Transition functions are called after a successful board or economy
//! operation and move the state machine to the next phase: PLACE_TILE →
//! zero or more RESOLVE_ACQUISITION entries → BUY_STOCK → the next player's
//! PLACE_TILE, with game-end detection on the way out of the buy phase.

use tracing::{debug, info};

use crate::domain::dealing::TileSource;
use crate::domain::placement::PlaceTileResult;
use crate::domain::state::{
    rotation_after, ActionDetails, GameState, Phase, PendingResolution, PlayerId, ResolutionTerms,
};
use crate::domain::stocks::{chain_price, handle_game_end, BonusPayout};
use crate::domain::tiles::Tile;
use crate::errors::RuleViolation;

/// What a phase transition did, for the caller to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnAdvance {
    /// Replacement tile drawn at the end of a turn, if the pool had one.
    pub drawn_tile: Option<Tile>,
    /// Player whose hand receives `drawn_tile`.
    pub tile_recipient: Option<PlayerId>,
    /// True when this transition ended the game.
    pub game_over: bool,
    /// Liquidation bonuses paid at game end; empty otherwise.
    pub endgame_payouts: Vec<BonusPayout>,
}

/// Advance after a tile placement.
///
/// Queues one resolution entry per (acquired chain, shareholder) pair:
/// acquired chains largest-first, shareholders visited in turn-order
/// rotation starting with the player after the one who placed. Entries are
/// pushed back and popped front, so the largest chain settles first. The
/// acquiree's price is frozen here; later resolutions ignore the board.
pub fn after_place(
    state: &mut GameState,
    placement: &PlaceTileResult,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    if !placement.acquired_chains.is_empty() {
        let Some(acquirer) = placement.acquirer else {
            return Err(RuleViolation::AcquirerMissing);
        };

        let actor = match state.current_action_player {
            Some(player) => player,
            None => panic!("placement accepted with no acting player"),
        };
        let visiting_order = rotation_after(&state.player_order, actor);

        let mut ordered: Vec<&_> = placement.acquired_chains.iter().collect();
        ordered.sort_by(|a, b| b.size().cmp(&a.size()));

        for chain in ordered {
            let acquiree = match chain.brand {
                Some(brand) => brand,
                None => panic!("acquired chain has no brand"),
            };
            let terms = ResolutionTerms {
                acquirer,
                acquiree,
                price: chain_price(chain),
            };
            for &player in &visiting_order {
                if state.holdings_of(player).count(acquiree) > 0 {
                    state
                        .resolution_queue
                        .push_back(PendingResolution { player, terms });
                }
            }
        }
        debug!(
            queued = state.resolution_queue.len(),
            "queued acquisition resolutions"
        );
    }

    after_resolve(state, tiles)
}

/// Advance after one acquisition resolution (or directly after a placement
/// with none pending).
pub fn after_resolve(
    state: &mut GameState,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    let Some(next) = state.resolution_queue.pop_front() else {
        if state.active_brands.is_empty() {
            // Nothing on the board is worth buying yet.
            return after_buy(state, tiles);
        }
        state.phase = Phase::BuyStock;
        state.current_action_player = state.current_turn_player;
        state.action_details = None;
        return Ok(TurnAdvance::default());
    };

    state.phase = Phase::ResolveAcquisition;
    state.current_action_player = Some(next.player);
    state.action_details = Some(ActionDetails::ResolveAcquisition(next.terms));
    debug!(
        player = next.player,
        acquiree = %next.terms.acquiree,
        "awaiting acquisition resolution"
    );
    Ok(TurnAdvance::default())
}

/// Advance after the buy phase: end the game or hand the turn on.
pub fn after_buy(
    state: &mut GameState,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    if game_is_over(state) {
        let payouts = handle_game_end(state)?;
        let standings = final_standings(state);
        state.phase = Phase::GameOver;
        state.current_turn_player = None;
        state.current_action_player = None;
        state.action_details = Some(ActionDetails::FinalStandings(standings.clone()));
        info!(?standings, "game over");
        return Ok(TurnAdvance {
            drawn_tile: None,
            tile_recipient: None,
            game_over: true,
            endgame_payouts: payouts,
        });
    }

    let holder = match state.current_turn_player {
        Some(player) => player,
        None => panic!("buy phase ended with no turn-holder"),
    };
    let drawn_tile = tiles.draw();
    state.tiles_remaining = tiles.remaining() as u32;

    let next = crate::domain::state::next_in_order(&state.player_order, holder);
    state.current_turn_player = Some(next);
    state.current_action_player = Some(next);
    state.phase = Phase::PlaceTile;
    state.action_details = None;
    debug!(from = holder, to = next, drawn = ?drawn_tile, "turn advanced");

    Ok(TurnAdvance {
        drawn_tile,
        tile_recipient: Some(holder),
        game_over: false,
        endgame_payouts: Vec::new(),
    })
}

/// The acting player declines to place a tile. The machine advances exactly
/// as after a placement with no acquisitions.
pub fn skip_placement(
    state: &mut GameState,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    after_resolve(state, tiles)
}

/// The game ends when any branded chain reaches the win size, or when at
/// least one branded chain exists and every branded chain is locked.
fn game_is_over(state: &GameState) -> bool {
    let win_size = state.config.win_size as usize;
    let lock_threshold = state.config.lock_threshold;

    let mut any_branded = false;
    let mut all_locked = true;
    for (_, chain) in state.branded_chains() {
        any_branded = true;
        if chain.size() >= win_size {
            return true;
        }
        if !chain.is_locked(lock_threshold) {
            all_locked = false;
        }
    }
    any_branded && all_locked
}

/// Players ranked by cash descending, stable on ties.
fn final_standings(state: &GameState) -> Vec<PlayerId> {
    let mut standings: Vec<PlayerId> = (0..state.player_count() as PlayerId).collect();
    standings.sort_by(|&a, &b| state.cash_of(b).cmp(&state.cash_of(a)));
    standings
}
