//! Rule violations reported to the caller.
//!
//! This is the engine's only error type. Every variant is an expected,
//! recoverable condition: the caller rejects the requesting action, discards
//! the uncommitted state, and relays the Display message to the end user.
//! Internal inconsistencies are programming defects and panic instead.

use thiserror::Error;

use crate::domain::brands::Brand;
use crate::domain::state::{Money, Phase, PlayerId};
use crate::domain::tiles::Tile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("tile {tile} is outside the board")]
    OutOfBounds { tile: Tile },

    #[error("cell {tile} is already occupied")]
    CellOccupied { tile: Tile },

    #[error("tile {tile} would bridge more than one locked chain")]
    BridgesLockedChains { tile: Tile },

    #[error("a lone tile cannot found a brand")]
    BrandOnIsolatedTile,

    #[error("brand {brand} is already active on the board")]
    BrandAlreadyActive { brand: Brand },

    #[error("chain is already branded as {current}")]
    CannotRebrand { current: Brand },

    #[error("merge is ambiguous: a brand of one of the largest chains must be chosen")]
    MergeBrandRequired,

    #[error("brand {brand} is not among the largest merged chains")]
    BrandNotAmongLargest { brand: Brand },

    #[error("merge resolves to {winner} automatically; no brand may be supplied")]
    UnexpectedBrandChoice { winner: Brand },

    #[error("brand {brand} has no chain on the board")]
    BrandNotOnBoard { brand: Brand },

    #[error("only {available} shares of {brand} remain, requested {requested}")]
    PoolExhausted {
        brand: Brand,
        requested: u8,
        available: u8,
    },

    #[error("purchase costs {cost} but player has {cash}")]
    InsufficientCash { cost: Money, cash: Money },

    #[error("player holds {held} shares of {brand}, requested {requested}")]
    InsufficientShares {
        brand: Brand,
        requested: u8,
        held: u8,
    },

    #[error("trades are two-for-one; cannot send {amount} shares")]
    UnevenTrade { amount: u8 },

    #[error("acquired chains carry no acquirer brand")]
    AcquirerMissing,

    #[error("no acquisition resolution is pending")]
    NoPendingResolution,

    #[error("action is not allowed in the {phase:?} phase")]
    PhaseMismatch { phase: Phase },

    #[error("it is not player {player}'s turn to act")]
    OutOfTurn { player: PlayerId },

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game has not started")]
    NotStarted,

    #[error("the game is full")]
    GameFull,

    #[error("at least {min} players are required, have {count}")]
    NotEnoughPlayers { min: u8, count: u8 },

    #[error("a turn allows at most {limit} share purchases, requested {requested}")]
    PurchaseLimitExceeded { limit: u8, requested: u8 },
}
