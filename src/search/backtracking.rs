use super::{Interrupted, SearchContext};

/**
chronological backtracking.
 1. choose the first unassigned vertex (if none, the coloring is complete)
 2. try each color in palette order, recurse if the partial coloring is still valid
 3. on failure, remove the color and try the next one

returns true if a coloring has been found (left in the context).
On failure, the coloring is left as it was found.
*/
pub(crate) fn backtracking(ctx:&mut SearchContext) -> Result<bool, Interrupted> {
    let vertex = match ctx.first_unassigned() {
        None => return Ok(ctx.is_valid()),
        Some(v) => v,
    };
    for color in 0..ctx.nb_colors() {
        ctx.assign(vertex, color)?;
        if ctx.is_valid() && backtracking(ctx)? {
            return Ok(true);
        }
        ctx.unassign(vertex)?;
    }
    Ok(false)
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;
    use crate::dataset::GraphDescription;
    use crate::search::observer::{Step, StepRecorder};

    #[test]
    fn test_steps_on_path() {
        let inst = CompactInstance::new(&GraphDescription::from_edges(
            &["A", "B", "C"], &[("A","B"), ("B","C")]
        )).unwrap();
        let mut recorder = StepRecorder::default();
        let mut ctx = SearchContext::new(&inst, 2, &mut recorder);
        assert_eq!(backtracking(&mut ctx), Ok(true));
        assert_eq!(ctx.coloring(), &[Some(0), Some(1), Some(0)]);
        drop(ctx);
        let step = |vertex, color| Step { vertex, color };
        assert_eq!(recorder.steps, vec![
            step(0, Some(0)),
            step(1, Some(0)),
            step(1, None),
            step(1, Some(1)),
            step(2, Some(0)),
        ]);
    }

    #[test]
    fn test_failure_restores_coloring() {
        let inst = CompactInstance::new(&GraphDescription::from_edges(
            &["A", "B", "C"], &[("A","B"), ("B","C"), ("A","C")]
        )).unwrap();
        let mut recorder = StepRecorder::default();
        let mut ctx = SearchContext::new(&inst, 2, &mut recorder);
        assert_eq!(backtracking(&mut ctx), Ok(false));
        assert!(ctx.coloring().iter().all(Option::is_none));
    }
}
