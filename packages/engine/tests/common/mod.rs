#![allow(dead_code)]

// tests/common/mod.rs

use engine::domain::state::ActionDetails;
use engine::{
    buy_action, join_game, place_action, resolve_action, skip_action, start_game, Brand,
    GameConfig, GameState, Phase, PlayerId, Tile, TileBag, TurnAdvance,
};

// Logging is auto-installed for every integration test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}


/// Per-brand stock conservation against the configured share count.
pub fn assert_stock_conserved(state: &GameState) {
    for brand in Brand::ALL {
        let held: u32 = state
            .holdings
            .iter()
            .map(|h| h.count(brand) as u32)
            .sum();
        assert_eq!(
            state.pool.count(brand) as u32 + held,
            state.config.shares_per_brand as u32,
            "stock conservation broken for {brand}"
        );
    }
}

/// Grid/chain agreement in both directions.
pub fn assert_grid_consistent(state: &GameState) {
    for x in 0..state.config.width {
        for y in 0..state.config.height {
            let tile = Tile::new(x, y);
            if let Some(id) = state.cell(tile) {
                assert!(
                    state.chains[&id].contains(tile),
                    "chain {id} does not list {tile}"
                );
            }
        }
    }
    for (id, chain) in &state.chains {
        for &tile in &chain.tiles {
            assert_eq!(state.cell(tile), Some(*id), "{tile} does not point at {id}");
        }
    }
}

/// A small board that fills fast, for full-game tests.
pub fn quick_config() -> GameConfig {
    GameConfig {
        width: 6,
        height: 5,
        win_size: 4,
        tile_hand_size: 3,
        ..GameConfig::default()
    }
}

fn deliver(hands: &mut [Vec<Tile>], advance: &TurnAdvance) {
    if let (Some(tile), Some(player)) = (advance.drawn_tile, advance.tile_recipient) {
        hands[player as usize].push(tile);
    }
}

/// Try every tile in the player's hand, preferring to found a brand, and
/// falling back through no-brand and every tie-break choice.
fn try_place_from_hand(
    state: &mut GameState,
    player: PlayerId,
    hands: &mut [Vec<Tile>],
    bag: &mut TileBag,
) -> Option<TurnAdvance> {
    let hand = hands[player as usize].clone();
    for (i, &tile) in hand.iter().enumerate() {
        let mut choices: Vec<Option<Brand>> = Vec::with_capacity(9);
        choices.push(state.inactive_brands.first().copied());
        choices.push(None);
        choices.extend(Brand::ALL.map(Some));

        for choice in choices {
            if let Ok(outcome) = place_action(state, player, tile, choice, bag) {
                hands[player as usize].remove(i);
                return Some(outcome.advance);
            }
        }
    }
    None
}

/// Drive a full game through the public action API with a simple scripted
/// policy, checking the board and stock invariants after every action.
pub fn play_to_completion(config: GameConfig, players: u8, seed: u64) -> GameState {
    let mut state = GameState::new(config);
    for _ in 0..players {
        join_game(&mut state).unwrap();
    }
    let mut bag = TileBag::shuffled(&state.config, seed);
    let outcome = start_game(&mut state, &mut bag, seed).unwrap();
    let mut hands = outcome.hands;

    for _ in 0..10_000 {
        match state.phase {
            Phase::GameOver => return state,
            Phase::PlaceTile => {
                let player = state.current_action_player.expect("actor in place phase");
                let advance = match try_place_from_hand(&mut state, player, &mut hands, &mut bag)
                {
                    Some(advance) => advance,
                    None => skip_action(&mut state, player, &mut bag).unwrap(),
                };
                deliver(&mut hands, &advance);
            }
            Phase::ResolveAcquisition => {
                let player = state.current_action_player.expect("actor in resolve phase");
                let acquiree = match &state.action_details {
                    Some(ActionDetails::ResolveAcquisition(terms)) => terms.acquiree,
                    other => panic!("resolve phase without terms: {other:?}"),
                };
                let held = state.holdings_of(player).count(acquiree);
                let advance = resolve_action(&mut state, player, held, 0, &mut bag).unwrap();
                deliver(&mut hands, &advance);
            }
            Phase::BuyStock => {
                let player = state.current_action_player.expect("actor in buy phase");
                let orders = affordable_order(&state, player);
                let advance = buy_action(&mut state, player, &orders, &mut bag).unwrap();
                deliver(&mut hands, &advance);
            }
        }
        assert_grid_consistent(&state);
        assert_stock_conserved(&state);
    }
    panic!("game did not reach GAME_OVER within the step limit");
}

/// Buy one share of the first active brand the player can afford, if any.
fn affordable_order(state: &GameState, player: PlayerId) -> Vec<(Brand, u8)> {
    for &brand in &state.active_brands {
        if state.pool.count(brand) == 0 {
            continue;
        }
        let id = state.chain_id_by_brand(brand).expect("active brand on board");
        let price = engine::chain_price(state.chain(id));
        if price <= state.cash_of(player) {
            return vec![(brand, 1)];
        }
    }
    Vec::new()
}
