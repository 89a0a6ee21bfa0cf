//! Tile placement: chain creation, growth, and merging.

use tracing::debug;

use crate::domain::brands::Brand;
use crate::domain::chains::{Chain, ChainId};
use crate::domain::state::GameState;
use crate::domain::tiles::Tile;
use crate::errors::RuleViolation;

/// What a successful placement did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceTileResult {
    /// Chains absorbed under a brand different from their own, in the order
    /// they were found around the tile. Each still holds its pre-merge tiles
    /// and brand; their ids are retired.
    pub acquired_chains: Vec<Chain>,
    /// Brand the merged chain resolved to, when this placement merged.
    pub acquirer: Option<Brand>,
    /// Brand founded by this placement, set only on the brand's first
    /// appearance on the board.
    pub new_brand: Option<Brand>,
    pub tile: Tile,
}

/// Place a tile, creating, growing, or merging chains.
///
/// `brand` is the caller's founding or tie-break choice; whether it is
/// required, forbidden, or constrained depends on the neighborhood, and the
/// wrong combination is a [`RuleViolation`]. On error the state is untouched.
pub fn place_tile(
    state: &mut GameState,
    tile: Tile,
    brand: Option<Brand>,
) -> Result<PlaceTileResult, RuleViolation> {
    if !state.in_bounds(tile) {
        return Err(RuleViolation::OutOfBounds { tile });
    }
    if state.cell(tile).is_some() {
        return Err(RuleViolation::CellOccupied { tile });
    }

    let neighbors = neighbor_chains(state, tile);

    // A tile may touch one locked chain (and be absorbed by it) but can
    // never connect two.
    let locked = neighbors
        .iter()
        .filter(|&&id| state.chain(id).is_locked(state.config.lock_threshold))
        .count();
    if locked > 1 {
        return Err(RuleViolation::BridgesLockedChains { tile });
    }

    match neighbors.as_slice() {
        [] => place_isolated(state, tile, brand),
        [id] => grow_chain(state, tile, *id, brand),
        _ => merge_chains(state, tile, &neighbors, brand),
    }
}

/// Distinct chains on the 4-connected neighbor cells, deduplicated by id in
/// first-seen order. Two neighbor cells may reference the same chain.
fn neighbor_chains(state: &GameState, tile: Tile) -> Vec<ChainId> {
    let mut ids = Vec::with_capacity(4);
    for neighbor in tile.neighbors(state.config.width, state.config.height) {
        if let Some(id) = state.cell(neighbor) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

fn place_isolated(
    state: &mut GameState,
    tile: Tile,
    brand: Option<Brand>,
) -> Result<PlaceTileResult, RuleViolation> {
    if brand.is_some() {
        return Err(RuleViolation::BrandOnIsolatedTile);
    }

    let id = state.allocate_chain_id();
    state.chains.insert(id, Chain::single(tile));
    state.set_cell(tile, id);
    debug!(%tile, chain = %id, "placed isolated tile");

    Ok(PlaceTileResult {
        acquired_chains: Vec::new(),
        acquirer: None,
        new_brand: None,
        tile,
    })
}

fn grow_chain(
    state: &mut GameState,
    tile: Tile,
    id: ChainId,
    brand: Option<Brand>,
) -> Result<PlaceTileResult, RuleViolation> {
    let current = state.chain(id).brand;

    if let Some(chosen) = brand {
        if state.active_brands.contains(&chosen) {
            return Err(RuleViolation::BrandAlreadyActive { brand: chosen });
        }
        if let Some(current) = current {
            return Err(RuleViolation::CannotRebrand { current });
        }
    }

    // A brand that survived the checks lands on an unbranded chain, so the
    // assignment is a founding.
    let new_brand = match (brand, current) {
        (Some(chosen), None) => Some(chosen),
        _ => None,
    };

    {
        let chain = state.chain_mut(id);
        chain.tiles.push(tile);
        if new_brand.is_some() {
            chain.brand = new_brand;
        }
    }
    state.set_cell(tile, id);
    if let Some(founded) = new_brand {
        state.activate_brand(founded);
    }
    debug!(%tile, chain = %id, brand = ?new_brand, "grew chain");

    Ok(PlaceTileResult {
        acquired_chains: Vec::new(),
        acquirer: None,
        new_brand,
        tile,
    })
}

fn merge_chains(
    state: &mut GameState,
    tile: Tile,
    ids: &[ChainId],
    brand: Option<Brand>,
) -> Result<PlaceTileResult, RuleViolation> {
    // Resolve the winning brand before touching anything.
    let branded: Vec<(Brand, usize)> = ids
        .iter()
        .filter_map(|&id| {
            let chain = state.chain(id);
            chain.brand.map(|b| (b, chain.size()))
        })
        .collect();

    let (winner, founding) = if branded.is_empty() {
        // Nothing pre-existing is branded, so a supplied brand founds it.
        match brand {
            Some(chosen) if state.active_brands.contains(&chosen) => {
                return Err(RuleViolation::BrandAlreadyActive { brand: chosen });
            }
            choice => (choice, choice.is_some()),
        }
    } else {
        let largest = branded.iter().map(|&(_, size)| size).fold(0, usize::max);
        let tied: Vec<Brand> = branded
            .iter()
            .filter(|&&(_, size)| size == largest)
            .map(|&(b, _)| b)
            .collect();

        if let [unique] = tied.as_slice() {
            if brand.is_some() {
                return Err(RuleViolation::UnexpectedBrandChoice { winner: *unique });
            }
            (Some(*unique), false)
        } else {
            match brand {
                None => return Err(RuleViolation::MergeBrandRequired),
                Some(chosen) if !tied.contains(&chosen) => {
                    return Err(RuleViolation::BrandNotAmongLargest { brand: chosen });
                }
                Some(chosen) => (Some(chosen), false),
            }
        }
    };

    // Retire every participant and build the union chain.
    let mut tiles = vec![tile];
    let mut acquired = Vec::new();
    for &id in ids {
        let chain = match state.chains.remove(&id) {
            Some(chain) => chain,
            None => unreachable!("cell referenced retired chain {id}"),
        };
        tiles.extend_from_slice(&chain.tiles);
        if chain.brand.is_some() && chain.brand != winner {
            acquired.push(chain);
        }
    }

    let new_id = state.allocate_chain_id();
    for &member in &tiles {
        state.set_cell(member, new_id);
    }
    state.chains.insert(
        new_id,
        Chain {
            tiles,
            brand: winner,
        },
    );

    for chain in &acquired {
        if let Some(defunct) = chain.brand {
            state.deactivate_brand(defunct);
        }
    }
    let new_brand = if founding { winner } else { None };
    if let Some(founded) = new_brand {
        state.activate_brand(founded);
    }

    debug!(
        %tile,
        chain = %new_id,
        winner = ?winner,
        acquired = acquired.len(),
        "merged chains"
    );

    Ok(PlaceTileResult {
        acquired_chains: acquired,
        acquirer: winner,
        new_brand,
        tile,
    })
}
