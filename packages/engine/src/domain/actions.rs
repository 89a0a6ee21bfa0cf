//! Player-action composition.
//!
//! One function per action a player can trigger. Each re-checks what the
//! transport layer cannot know without the state (game started, phase,
//! acting player), then runs the board/economy operation and the phase
//! transition in order. Any error leaves the caller's loaded state
//! uncommitted; nothing here rolls back.

use tracing::debug;

use crate::domain::brands::Brand;
use crate::domain::dealing::TileSource;
use crate::domain::placement::{place_tile, PlaceTileResult};
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::stocks::{
    apply_majority_bonuses, award_founder_share, execute_purchase, resolve_acquisition,
    BonusPayout,
};
use crate::domain::tiles::Tile;
use crate::domain::turns::{after_buy, after_place, after_resolve, skip_placement, TurnAdvance};
use crate::errors::RuleViolation;

/// Everything one placement action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub placement: PlaceTileResult,
    /// Majority bonuses paid for chains acquired by this placement.
    pub bonuses: Vec<BonusPayout>,
    pub advance: TurnAdvance,
}

fn check_actor(state: &GameState, player: PlayerId, phase: Phase) -> Result<(), RuleViolation> {
    if !state.started {
        return Err(RuleViolation::NotStarted);
    }
    if state.phase != phase {
        return Err(RuleViolation::PhaseMismatch { phase: state.phase });
    }
    if state.current_action_player != Some(player) {
        return Err(RuleViolation::OutOfTurn { player });
    }
    Ok(())
}

/// Place a tile: board placement, acquisition bonuses, founder share, then
/// the phase transition.
pub fn place_action(
    state: &mut GameState,
    player: PlayerId,
    tile: Tile,
    brand: Option<Brand>,
    tiles: &mut dyn TileSource,
) -> Result<PlaceOutcome, RuleViolation> {
    check_actor(state, player, Phase::PlaceTile)?;

    let placement = place_tile(state, tile, brand)?;
    let bonuses = apply_majority_bonuses(state, &placement.acquired_chains);
    award_founder_share(state, player, placement.new_brand);
    let advance = after_place(state, &placement, tiles)?;

    debug!(player, %tile, "placement action applied");
    Ok(PlaceOutcome {
        placement,
        bonuses,
        advance,
    })
}

/// Decline to place a tile.
pub fn skip_action(
    state: &mut GameState,
    player: PlayerId,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    check_actor(state, player, Phase::PlaceTile)?;
    debug!(player, "placement skipped");
    skip_placement(state, tiles)
}

/// Settle the pending acquisition: sell and trade the chosen amounts, keep
/// the rest, then advance.
pub fn resolve_action(
    state: &mut GameState,
    player: PlayerId,
    sell_amount: u8,
    trade_amount: u8,
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    check_actor(state, player, Phase::ResolveAcquisition)?;
    resolve_acquisition(state, player, sell_amount, trade_amount)?;
    after_resolve(state, tiles)
}

/// Buy up to the per-turn limit of shares, then advance (possibly ending
/// the game).
pub fn buy_action(
    state: &mut GameState,
    player: PlayerId,
    orders: &[(Brand, u8)],
    tiles: &mut dyn TileSource,
) -> Result<TurnAdvance, RuleViolation> {
    check_actor(state, player, Phase::BuyStock)?;
    execute_purchase(state, player, orders)?;
    after_buy(state, tiles)
}
