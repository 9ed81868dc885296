use crate::domain::Domains;

use super::{Interrupted, SearchContext};

/**
backtracking maintaining arc consistency.
Same vertex and color order as the chronological backtracking, but each valid assignment is
followed by a revision of a copy of the domains. The search only goes deeper if the revision
succeeds, with the revised copy. The domains of the caller are never modified.
*/
pub(crate) fn mac_backtracking(ctx:&mut SearchContext, domains:&Domains) -> Result<bool, Interrupted> {
    let vertex = match ctx.first_unassigned() {
        None => return Ok(ctx.is_valid()),
        Some(v) => v,
    };
    for color in 0..ctx.nb_colors() {
        let mut updated_domains = domains.clone();
        ctx.assign(vertex, color)?;
        if ctx.is_valid() && ctx.revise(&mut updated_domains)
        && mac_backtracking(ctx, &updated_domains)? {
            return Ok(true);
        }
        ctx.unassign(vertex)?;
    }
    Ok(false)
}
