//! Stock economy: pricing, trading, bonuses, and liquidation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::brands::Brand;
use crate::domain::chains::Chain;
use crate::domain::rules::{bonus_split, first_bonus, second_bonus, share_price, size_tier};
use crate::domain::state::{ActionDetails, GameState, Money, PlayerId};
use crate::errors::RuleViolation;

/// Pricing tier of a branded chain. Unbranded chains have no tier.
pub fn chain_tier(chain: &Chain) -> u8 {
    let brand = match chain.brand {
        Some(brand) => brand,
        None => panic!("unbranded chains have no price"),
    };
    size_tier(chain.size()) + brand.tier_bonus()
}

/// Current share price of a branded chain.
pub fn chain_price(chain: &Chain) -> Money {
    share_price(chain_tier(chain))
}

/// Share price of `brand`'s chain on the board.
pub fn brand_price(state: &GameState, brand: Brand) -> Result<Money, RuleViolation> {
    let id = state
        .chain_id_by_brand(brand)
        .ok_or(RuleViolation::BrandNotOnBoard { brand })?;
    Ok(chain_price(state.chain(id)))
}

/// Buy `amount` shares of `brand` at the current board price.
pub fn buy_stock(
    state: &mut GameState,
    player: PlayerId,
    brand: Brand,
    amount: u8,
) -> Result<(), RuleViolation> {
    if amount == 0 {
        return Ok(());
    }

    let price = brand_price(state, brand)?;
    let available = state.pool.count(brand);
    if amount > available {
        return Err(RuleViolation::PoolExhausted {
            brand,
            requested: amount,
            available,
        });
    }
    let cost = price * amount as Money;
    let cash = state.cash_of(player);
    if cost > cash {
        return Err(RuleViolation::InsufficientCash { cost, cash });
    }

    state.cash[player as usize] -= cost;
    state.holdings[player as usize].add(brand, amount);
    state.pool.remove(brand, amount);
    debug!(player, %brand, amount, cost, "bought stock");
    Ok(())
}

/// Sell `amount` shares of `brand` back to the pool at `unit_price`.
///
/// The price is supplied by the caller because acquisition resolutions sell
/// at the price frozen when the merge happened, not the current one.
pub fn sell_stock(
    state: &mut GameState,
    player: PlayerId,
    brand: Brand,
    unit_price: Money,
    amount: u8,
) -> Result<(), RuleViolation> {
    let held = state.holdings_of(player).count(brand);
    if amount > held {
        return Err(RuleViolation::InsufficientShares {
            brand,
            requested: amount,
            held,
        });
    }

    state.holdings[player as usize].remove(brand, amount);
    state.pool.add(brand, amount);
    state.cash[player as usize] += unit_price * amount as Money;
    debug!(player, %brand, amount, unit_price, "sold stock");
    Ok(())
}

/// Trade shares two-for-one: send `send` shares of `from` back to its pool
/// and receive `send / 2` shares of `to` from its pool.
pub fn trade_stock(
    state: &mut GameState,
    player: PlayerId,
    from: Brand,
    to: Brand,
    send: u8,
) -> Result<(), RuleViolation> {
    if send % 2 != 0 {
        return Err(RuleViolation::UnevenTrade { amount: send });
    }
    let receive = send / 2;
    let available = state.pool.count(to);
    if receive > available {
        return Err(RuleViolation::PoolExhausted {
            brand: to,
            requested: receive,
            available,
        });
    }
    let held = state.holdings_of(player).count(from);
    if send > held {
        return Err(RuleViolation::InsufficientShares {
            brand: from,
            requested: send,
            held,
        });
    }

    state.holdings[player as usize].remove(from, send);
    state.pool.add(from, send);
    state.holdings[player as usize].add(to, receive);
    state.pool.remove(to, receive);
    debug!(player, %from, %to, send, receive, "traded stock");
    Ok(())
}

/// Grant the founder of a brand one free share, if any remain.
pub fn award_founder_share(state: &mut GameState, player: PlayerId, brand: Option<Brand>) {
    let Some(brand) = brand else {
        return;
    };
    if state.pool.count(brand) == 0 {
        return;
    }
    state.pool.remove(brand, 1);
    state.holdings[player as usize].add(brand, 1);
    debug!(player, %brand, "awarded founder share");
}

/// One majority-bonus payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusPayout {
    pub player: PlayerId,
    pub brand: Brand,
    pub amount: Money,
}

/// Pay majority-holder bonuses for each chain.
///
/// Players are ranked by their holdings of the chain's brand, descending,
/// with equal counts forming one rank; zero holders are ignored entirely.
/// A tie for first splits both bonuses across the leaders; a unique leader
/// takes the first bonus and the second bonus goes to the next rank, or to
/// the leader as well when nobody else holds any. Split shares round up to
/// the nearest 100. Returns every payment made.
pub fn apply_majority_bonuses(state: &mut GameState, chains: &[Chain]) -> Vec<BonusPayout> {
    let mut payouts = Vec::new();
    let players = state.player_count() as PlayerId;

    for chain in chains {
        let brand = match chain.brand {
            Some(brand) => brand,
            None => panic!("majority bonuses apply to branded chains"),
        };
        let tier = chain_tier(chain);

        let mut by_count: BTreeMap<u8, Vec<PlayerId>> = BTreeMap::new();
        for player in 0..players {
            let held = state.holdings_of(player).count(brand);
            if held > 0 {
                by_count.entry(held).or_default().push(player);
            }
        }

        let mut ranks = by_count.into_iter().rev().map(|(_, group)| group);
        let Some(leaders) = ranks.next() else {
            continue;
        };

        let first = first_bonus(tier);
        let second = second_bonus(tier);

        if leaders.len() >= 2 {
            let each = bonus_split(first + second, leaders.len());
            for player in leaders {
                payouts.push(pay_bonus(state, player, brand, each));
            }
            continue;
        }

        let leader = leaders[0];
        payouts.push(pay_bonus(state, leader, brand, first));
        match ranks.next() {
            None => payouts.push(pay_bonus(state, leader, brand, second)),
            Some(runners_up) => {
                let each = bonus_split(second, runners_up.len());
                for player in runners_up {
                    payouts.push(pay_bonus(state, player, brand, each));
                }
            }
        }
    }

    payouts
}

fn pay_bonus(state: &mut GameState, player: PlayerId, brand: Brand, amount: Money) -> BonusPayout {
    state.cash[player as usize] += amount;
    debug!(player, %brand, amount, "paid majority bonus");
    BonusPayout {
        player,
        brand,
        amount,
    }
}

/// End-of-game liquidation: majority bonuses on every branded chain, then a
/// forced sale of every player's entire holding of each branded chain's
/// brand at its current price.
pub fn handle_game_end(state: &mut GameState) -> Result<Vec<BonusPayout>, RuleViolation> {
    let branded: Vec<Chain> = state
        .chains
        .values()
        .filter(|chain| chain.brand.is_some())
        .cloned()
        .collect();

    let payouts = apply_majority_bonuses(state, &branded);

    let players = state.player_count() as PlayerId;
    for chain in &branded {
        let Some(brand) = chain.brand else {
            continue;
        };
        let price = chain_price(chain);
        for player in 0..players {
            let held = state.holdings_of(player).count(brand);
            if held > 0 {
                sell_stock(state, player, brand, price, held)?;
            }
        }
    }

    Ok(payouts)
}

/// Settle the acting player's stake in the acquisition currently on the
/// state: sell `sell_amount` at the frozen price and trade `trade_amount`
/// two-for-one into the acquirer. Whatever remains is kept.
pub fn resolve_acquisition(
    state: &mut GameState,
    player: PlayerId,
    sell_amount: u8,
    trade_amount: u8,
) -> Result<(), RuleViolation> {
    let terms = match &state.action_details {
        Some(ActionDetails::ResolveAcquisition(terms)) => *terms,
        _ => return Err(RuleViolation::NoPendingResolution),
    };

    let held = state.holdings_of(player).count(terms.acquiree);
    if sell_amount as u16 + trade_amount as u16 > held as u16 {
        return Err(RuleViolation::InsufficientShares {
            brand: terms.acquiree,
            requested: sell_amount.saturating_add(trade_amount),
            held,
        });
    }
    // Check the trade leg up front so a rejected trade cannot leave the
    // sell leg already applied.
    if trade_amount % 2 != 0 {
        return Err(RuleViolation::UnevenTrade {
            amount: trade_amount,
        });
    }
    let receive = trade_amount / 2;
    let available = state.pool.count(terms.acquirer);
    if receive > available {
        return Err(RuleViolation::PoolExhausted {
            brand: terms.acquirer,
            requested: receive,
            available,
        });
    }

    sell_stock(state, player, terms.acquiree, terms.price, sell_amount)?;
    trade_stock(state, player, terms.acquiree, terms.acquirer, trade_amount)?;
    debug!(
        player,
        acquiree = %terms.acquiree,
        acquirer = %terms.acquirer,
        sell_amount,
        trade_amount,
        kept = held - sell_amount - trade_amount,
        "resolved acquisition"
    );
    Ok(())
}

/// Buy a batch of shares, enforcing the per-turn purchase limit before any
/// order applies.
pub fn execute_purchase(
    state: &mut GameState,
    player: PlayerId,
    orders: &[(Brand, u8)],
) -> Result<(), RuleViolation> {
    let limit = state.config.purchase_limit;
    let requested: u32 = orders.iter().map(|&(_, amount)| amount as u32).sum();
    if requested > limit as u32 {
        return Err(RuleViolation::PurchaseLimitExceeded {
            limit,
            requested: requested.min(u8::MAX as u32) as u8,
        });
    }

    for &(brand, amount) in orders {
        buy_stock(state, player, brand, amount)?;
    }
    Ok(())
}
