//! Game lifecycle: joining the lobby and starting play.

use tracing::info;

use crate::domain::dealing::TileSource;
use crate::domain::placement::place_tile;
use crate::domain::state::{order_is_unique, GameState, Phase, PlayerId};
use crate::domain::tiles::Tile;
use crate::errors::RuleViolation;

/// What `start_game` dealt, owned by the caller.
///
/// The engine never tracks hands; hand membership checks belong to the
/// transport layer, like identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    /// Tiles placed on the board before the first turn, one per player.
    pub starting_tiles: Vec<Tile>,
    /// Dealt hands, indexed by PlayerId.
    pub hands: Vec<Vec<Tile>>,
}

/// Add a player to a not-yet-started game.
///
/// PlayerIds are dense join-order integers; mapping them to external
/// identities is the caller's concern.
pub fn join_game(state: &mut GameState) -> Result<PlayerId, RuleViolation> {
    if state.started {
        return Err(RuleViolation::AlreadyStarted);
    }
    if state.player_count() >= state.config.max_players as usize {
        return Err(RuleViolation::GameFull);
    }

    let player = state.player_count() as PlayerId;
    state.player_order.push(player);
    state.cash.push(state.config.starting_cash);
    state
        .holdings
        .push(crate::domain::brands::ShareTable::zero());
    info!(player, "player joined");
    Ok(player)
}

/// Start the game: shuffle the turn order, seed the board with one tile per
/// player, and deal hands.
///
/// Starting tiles go through the normal placement path, so adjacent ones
/// legally pre-merge into unbranded chains. The first player in the shuffled
/// order acts first.
pub fn start_game(
    state: &mut GameState,
    tiles: &mut dyn TileSource,
    seed: u64,
) -> Result<StartOutcome, RuleViolation> {
    if state.started {
        return Err(RuleViolation::AlreadyStarted);
    }
    let count = state.player_count() as u8;
    if count < state.config.min_players {
        return Err(RuleViolation::NotEnoughPlayers {
            min: state.config.min_players,
            count,
        });
    }
    assert!(
        order_is_unique(&state.player_order),
        "turn order must be duplicate-free"
    );

    crate::domain::dealing::shuffle_with_seed(&mut state.player_order, seed);
    let first = state.player_order[0];

    state.started = true;
    state.phase = Phase::PlaceTile;
    state.current_turn_player = Some(first);
    state.current_action_player = Some(first);

    let starting_tiles = tiles.draw_many(count as usize);
    for &tile in &starting_tiles {
        // The bag yields unique in-bounds empty cells, so this cannot fail.
        place_tile(state, tile, None)
            .unwrap_or_else(|violation| panic!("starting tile rejected: {violation}"));
    }

    let mut hands = vec![Vec::new(); count as usize];
    for &player in &state.player_order {
        hands[player as usize] = tiles.draw_many(state.config.tile_hand_size as usize);
    }
    state.tiles_remaining = tiles.remaining() as u32;

    info!(
        players = count,
        first, "game started"
    );
    Ok(StartOutcome {
        starting_tiles,
        hands,
    })
}
