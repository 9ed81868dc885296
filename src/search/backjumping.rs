use bit_set::BitSet;
use log::debug;

use crate::color::VertexId;

use super::{Interrupted, SearchContext};

/** result of a backjumping call */
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Evaluation {
    /// true if a coloring has been found
    pub is_valid: bool,
    /// on failure: vertices responsible for it
    pub conflict_set: BitSet,
}

impl Evaluation {
    fn success() -> Self { Self { is_valid: true, conflict_set: BitSet::new() } }

    fn failure(conflict_set:BitSet) -> Self { Self { is_valid: false, conflict_set } }
}

/// v and its neighbors sharing its color
fn conflicts_of(ctx:&SearchContext, v:VertexId) -> BitSet {
    let coloring = ctx.coloring();
    let mut res = BitSet::new();
    res.insert(v);
    for u in ctx.inst().neighbors(v) {
        if coloring[*u].is_some() && coloring[*u] == coloring[v] {
            res.insert(*u);
        }
    }
    res
}

/**
conflict-directed backjumping.

Each color tried for the current vertex v yields a set of culprits: the conflict set returned
by the recursive call if the assignment is valid, or v and its same-colored neighbors otherwise.
 - if v is not a culprit, changing its color cannot fix the failure: the search returns at once
   with these culprits (jump back), without trying the remaining colors.
 - otherwise the culprits (except v) are added to the conflict set of v, and the next color is tried.
Once all colors fail, the conflict set of v is returned.

A jump leaves the vertices it skips colored. The frame that receives the conflict set clears
them before going on, so that every frame finds the coloring as its parent left it.
*/
pub(crate) fn backjumping(ctx:&mut SearchContext) -> Result<Evaluation, Interrupted> {
    let vertex = match ctx.first_unassigned() {
        None => return Ok(if ctx.is_valid() { Evaluation::success() } else { Evaluation::failure(BitSet::new()) }),
        Some(v) => v,
    };
    let mut conflict_set = BitSet::new();
    for color in 0..ctx.nb_colors() {
        ctx.assign(vertex, color)?;
        let mut new_conflicts = if ctx.is_valid() {
            let evaluation = backjumping(ctx)?;
            if evaluation.is_valid {
                return Ok(Evaluation::success());
            }
            ctx.unassign_from(vertex+1)?;
            evaluation.conflict_set
        } else {
            conflicts_of(ctx, vertex)
        };
        if !new_conflicts.contains(vertex) {
            ctx.stats_mut().nb_backjumps += 1;
            debug!("jump over {} (conflicts: {:?})", ctx.inst().name(vertex), new_conflicts);
            return Ok(Evaluation::failure(new_conflicts));
        }
        new_conflicts.remove(vertex);
        conflict_set.union_with(&new_conflicts);
        ctx.unassign(vertex)?;
    }
    Ok(Evaluation::failure(conflict_set))
}
