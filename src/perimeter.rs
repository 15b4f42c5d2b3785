//! Boundary detection under hex adjacency.

use bevy::platform::collections::HashSet;
use hexx::Hex;

use crate::axial::neighbors;

/// Cells with at least one of their six neighbors missing from `cells`.
///
/// This is the topological boundary of the set, not a convex hull: notches
/// between the star's points count as boundary too.
pub fn find_perimeter<I>(cells: I) -> HashSet<Hex>
where
    I: IntoIterator<Item = Hex>,
{
    let cells: Vec<Hex> = cells.into_iter().collect();
    let lookup: HashSet<Hex> = cells.iter().copied().collect();

    cells
        .into_iter()
        .filter(|&hex| neighbors(hex).iter().any(|n| !lookup.contains(n)))
        .collect()
}
