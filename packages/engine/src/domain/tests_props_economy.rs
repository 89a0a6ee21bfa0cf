//! Property tests for the stock economy: conservation and atomicity.

use proptest::prelude::*;

use crate::domain::brands::Brand;
use crate::domain::state::{ActionDetails, GameState, Money, PlayerId, ResolutionTerms};
use crate::domain::stocks::{
    apply_majority_bonuses, award_founder_share, buy_stock, resolve_acquisition, sell_stock,
    trade_stock,
};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{
    assert_stock_conserved, install_chain, row, started_game,
};

#[derive(Debug, Clone)]
enum EconomyOp {
    Buy(PlayerId, Brand, u8),
    Sell(PlayerId, Brand, Money, u8),
    Trade(PlayerId, Brand, Brand, u8),
    Founder(PlayerId, Option<Brand>),
    Bonuses(Brand),
    Resolve(PlayerId, u8, u8),
}

fn economy_op() -> impl Strategy<Value = EconomyOp> {
    let player = 0u8..3;
    prop_oneof![
        (player.clone(), test_gens::brand(), test_gens::share_amount())
            .prop_map(|(p, b, n)| EconomyOp::Buy(p, b, n)),
        (player.clone(), test_gens::brand(), 100u32..=1200, test_gens::share_amount())
            .prop_map(|(p, b, price, n)| EconomyOp::Sell(p, b, price, n)),
        (player.clone(), test_gens::two_distinct_brands(), test_gens::share_amount())
            .prop_map(|(p, (from, to), n)| EconomyOp::Trade(p, from, to, n)),
        (player, proptest::option::of(test_gens::brand()))
            .prop_map(|(p, b)| EconomyOp::Founder(p, b)),
        prop_oneof![Just(Brand::Tower), Just(Brand::Imperial)].prop_map(EconomyOp::Bonuses),
        (0u8..3, test_gens::share_amount(), test_gens::share_amount())
            .prop_map(|(p, sell, trade)| EconomyOp::Resolve(p, sell, trade)),
    ]
}

/// Apply one op; Err means the state must be untouched.
fn apply(state: &mut GameState, op: &EconomyOp) -> Result<(), crate::errors::RuleViolation> {
    match *op {
        EconomyOp::Buy(p, b, n) => buy_stock(state, p, b, n),
        EconomyOp::Sell(p, b, price, n) => sell_stock(state, p, b, price, n),
        EconomyOp::Trade(p, from, to, n) => trade_stock(state, p, from, to, n),
        EconomyOp::Founder(p, b) => {
            award_founder_share(state, p, b);
            Ok(())
        }
        EconomyOp::Bonuses(b) => {
            let chain = state
                .chain(state.chain_id_by_brand(b).expect("brand installed"))
                .clone();
            apply_majority_bonuses(state, &[chain]);
            Ok(())
        }
        EconomyOp::Resolve(p, sell, trade) => resolve_acquisition(state, p, sell, trade),
    }
}

fn market_state() -> GameState {
    let mut state = started_game(3);
    install_chain(&mut state, &row(0, 0, 2), Some(Brand::Tower));
    install_chain(&mut state, &row(0, 2, 3), Some(Brand::Imperial));
    // Standing terms so acquisition settlements are in the op mix.
    state.action_details = Some(ActionDetails::ResolveAcquisition(ResolutionTerms {
        acquirer: Brand::Imperial,
        acquiree: Brand::Tower,
        price: 200,
    }));
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Invariant 3: pool + holdings stays at 25 per brand through any
    /// sequence of economy operations, accepted or rejected.
    #[test]
    fn prop_stock_conservation(ops in proptest::collection::vec(economy_op(), 1..40)) {
        let mut state = market_state();
        for op in &ops {
            let _ = apply(&mut state, op);
            assert_stock_conserved(&state);
        }
    }

    /// A rejected operation leaves the state byte-for-byte unchanged.
    #[test]
    fn prop_rejected_ops_do_not_mutate(ops in proptest::collection::vec(economy_op(), 1..40)) {
        let mut state = market_state();
        for op in &ops {
            let before = state.clone();
            if apply(&mut state, op).is_err() {
                prop_assert_eq!(&state, &before, "failed {:?} mutated state", op);
            }
        }
    }

    /// Cash moves only where the operation says it does: trades and founder
    /// shares never touch it.
    #[test]
    fn prop_cashless_operations(
        player in 0u8..3,
        (from, to) in test_gens::two_distinct_brands(),
        n in test_gens::share_amount(),
    ) {
        let mut state = market_state();
        // Seed enough holdings for the trade to be able to succeed.
        state.pool.remove(from, 25);
        state.holdings[player as usize].add(from, 25);

        let cash_before = state.cash.clone();
        let _ = trade_stock(&mut state, player, from, to, n);
        award_founder_share(&mut state, player, Some(to));
        prop_assert_eq!(&state.cash, &cash_before);
        assert_stock_conserved(&state);
    }
}
