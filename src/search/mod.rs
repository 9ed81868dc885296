//! Search strategies for the graph coloring problem.
//!
//! The three strategies share the same skeleton: pick the first unassigned vertex (evaluation
//! order), try every color of the palette in order, recurse on valid partial colorings and undo
//! the assignment on failure. They differ by what they prune and by where they resume after a
//! failure.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use crate::color::{ColorId, Coloring, ColoringInstance, Palette, VertexId, is_valid};
use crate::domain::Domains;

/// AC-3 revision procedure
pub mod ac3;

/// step notifications, pacing and cancellation
pub mod observer;

/// plain backtracking
mod backtracking;

/// backtracking maintaining arc consistency
mod mac_backtracking;

/// conflict-directed backjumping
mod backjumping;

use observer::{SilentObserver, Step, StepObserver};


/** search strategy */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// BT: chronological backtracking
    Backtracking,
    /// MAC-BT: backtracking, each assignment followed by an AC-3 revision
    MacBacktracking,
    /// BJ: conflict-directed backjumping
    Backjumping,
}

impl Strategy {
    /// the three strategies
    pub const ALL: [Strategy; 3] = [Strategy::Backtracking, Strategy::MacBacktracking, Strategy::Backjumping];

    /// short name (as used on the command line)
    pub fn short_name(&self) -> &'static str {
        match self {
            Strategy::Backtracking => "bt",
            Strategy::MacBacktracking => "mac-bt",
            Strategy::Backjumping => "bj",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name().to_uppercase())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        Strategy::ALL.iter()
            .find(|strategy| strategy.short_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown strategy {} (valid: bt, mac-bt, bj)", s))
    }
}

/** counters gathered during a search */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// number of colors given to a vertex
    pub nb_assignments: usize,
    /// number of colors removed from a vertex
    pub nb_unassignments: usize,
    /// number of calls to the revision procedure
    pub nb_revisions: usize,
    /// number of revisions that emptied a domain
    pub nb_wipeouts: usize,
    /// number of frames left without trying their remaining colors
    pub nb_backjumps: usize,
}

/** how a search ended */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// a complete valid coloring was found (color of each vertex)
    Solved(Vec<ColorId>),
    /// every branch has been explored, no valid coloring exists
    Exhausted,
    /// the observer requested to stop
    Cancelled,
}

/** result of a search */
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// strategy used
    pub strategy: Strategy,
    /// final status
    pub outcome: SearchOutcome,
    /// coloring when the search stopped
    pub coloring: Coloring,
    /// counters
    pub stats: SearchStats,
    /// time spent (seconds), including the pacing of the observer
    pub time_searched: f32,
}

impl SearchReport {
    /// true iff a coloring was found
    pub fn is_solved(&self) -> bool { matches!(self.outcome, SearchOutcome::Solved(_)) }
}


/// the observer asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interrupted;

/**
state of a running search: the coloring (shared by all the recursive calls, which must leave it
as they found it when they fail), the observer and the counters.
*/
pub(crate) struct SearchContext<'a> {
    inst: &'a dyn ColoringInstance,
    nb_colors: usize,
    coloring: Coloring,
    observer: &'a mut dyn StepObserver,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(inst:&'a dyn ColoringInstance, nb_colors:usize, observer:&'a mut dyn StepObserver) -> Self {
        Self {
            inst,
            nb_colors,
            coloring: vec![None ; inst.nb_vertices()],
            observer,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn inst(&self) -> &'a dyn ColoringInstance { self.inst }

    pub(crate) fn nb_colors(&self) -> usize { self.nb_colors }

    pub(crate) fn coloring(&self) -> &[Option<ColorId>] { &self.coloring }

    pub(crate) fn stats_mut(&mut self) -> &mut SearchStats { &mut self.stats }

    /// first unassigned vertex in evaluation order
    pub(crate) fn first_unassigned(&self) -> Option<VertexId> {
        self.coloring.iter().position(Option::is_none)
    }

    /// true iff the current partial coloring has no conflict
    pub(crate) fn is_valid(&self) -> bool { is_valid(self.inst, &self.coloring) }

    /// gives color c to v and notifies the observer
    pub(crate) fn assign(&mut self, v:VertexId, c:ColorId) -> Result<(), Interrupted> {
        self.coloring[v] = Some(c);
        self.stats.nb_assignments += 1;
        self.notify(Step { vertex: v, color: Some(c) })
    }

    /// removes the color of v and notifies the observer
    pub(crate) fn unassign(&mut self, v:VertexId) -> Result<(), Interrupted> {
        self.coloring[v] = None;
        self.stats.nb_unassignments += 1;
        self.notify(Step { vertex: v, color: None })
    }

    /// unassigns every vertex from `first` on that still has a color (last one first)
    pub(crate) fn unassign_from(&mut self, first:VertexId) -> Result<(), Interrupted> {
        for v in (first..self.coloring.len()).rev() {
            if self.coloring[v].is_some() {
                self.unassign(v)?;
            }
        }
        Ok(())
    }

    /// runs the revision procedure on a copy owned by the caller
    pub(crate) fn revise(&mut self, domains:&mut Domains) -> bool {
        self.stats.nb_revisions += 1;
        let consistent = ac3::revise(self.inst, &self.coloring, domains);
        if !consistent { self.stats.nb_wipeouts += 1; }
        consistent
    }

    fn notify(&mut self, step:Step) -> Result<(), Interrupted> {
        debug!("{} <- {:?}", self.inst.name(step.vertex), step.color);
        if self.observer.on_step(&step).is_break() {
            return Err(Interrupted);
        }
        Ok(())
    }
}


/**
Solver for a given instance and palette. Both are read-only: every run starts from an empty
coloring and full domains, so running a strategy twice gives the same result and the same steps.
*/
#[derive(Debug, Clone)]
pub struct Solver {
    inst: Rc<dyn ColoringInstance>,
    palette: Palette,
}

impl Solver {
    /// creates a solver
    pub fn new(inst:Rc<dyn ColoringInstance>, palette:Palette) -> Self {
        Self { inst, palette }
    }

    /// instance solved
    pub fn instance(&self) -> &dyn ColoringInstance { self.inst.as_ref() }

    /// palette used
    pub fn palette(&self) -> &Palette { &self.palette }

    /** runs a strategy, notifying the observer after each step */
    pub fn run(&self, strategy:Strategy, observer:&mut dyn StepObserver) -> SearchReport {
        let time_init = Instant::now();
        let inst = self.inst.as_ref();
        let mut ctx = SearchContext::new(inst, self.palette.len(), observer);
        info!("running {} ({} vertices, {} colors)", strategy, inst.nb_vertices(), self.palette.len());
        let result = match strategy {
            Strategy::Backtracking => backtracking::backtracking(&mut ctx),
            Strategy::MacBacktracking => {
                let domains = Domains::full(inst.nb_vertices(), self.palette.len());
                mac_backtracking::mac_backtracking(&mut ctx, &domains)
            },
            Strategy::Backjumping => backjumping::backjumping(&mut ctx).and_then(|evaluation| {
                if !evaluation.is_valid {
                    ctx.unassign_from(0)?; // vertices left by the last jump
                }
                Ok(evaluation.is_valid)
            }),
        };
        let outcome = match result {
            Ok(true) => match ctx.coloring.iter().copied().collect::<Option<Vec<ColorId>>>() {
                Some(colors) => SearchOutcome::Solved(colors),
                None => unreachable!("a successful search colors every vertex"),
            },
            Ok(false) => SearchOutcome::Exhausted,
            Err(Interrupted) => SearchOutcome::Cancelled,
        };
        let SearchContext { coloring, stats, .. } = ctx;
        let report = SearchReport {
            strategy,
            outcome,
            coloring,
            stats,
            time_searched: time_init.elapsed().as_secs_f32(),
        };
        info!("{} finished: {:?} ({} assignments, {} backjumps)",
            strategy, report.outcome, report.stats.nb_assignments, report.stats.nb_backjumps);
        report
    }

    /** runs a strategy without observer. returns true iff a coloring exists */
    pub fn run_search(&self, strategy:Strategy) -> bool {
        self.run(strategy, &mut SilentObserver).is_solved()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::ops::ControlFlow;

    use crate::color::{checker, CheckerResult};
    use crate::compact_instance::{CompactInstance, InstanceFormat};
    use crate::dataset::GraphDescription;
    use crate::search::observer::StepRecorder;

    fn solver(ids:&[&str], edges:&[(&str,&str)], nb_colors:usize) -> Solver {
        let inst = CompactInstance::new(&GraphDescription::from_edges(ids, edges)).unwrap();
        Solver::new(Rc::new(inst), Palette::with_nb_colors(nb_colors).unwrap())
    }

    fn solver_from_file(filename:&str, format:InstanceFormat, nb_colors:usize) -> Solver {
        let inst = CompactInstance::from_file(filename, format).unwrap();
        Solver::new(Rc::new(inst), Palette::with_nb_colors(nb_colors).unwrap())
    }

    fn path() -> [(&'static str, &'static str); 2] { [("A","B"), ("B","C")] }

    fn triangle() -> [(&'static str, &'static str); 3] { [("A","B"), ("B","C"), ("A","C")] }

    /// checks that a solved report holds a complete valid coloring
    fn assert_sound(solver:&Solver, report:&SearchReport) {
        match &report.outcome {
            SearchOutcome::Solved(colors) => {
                let coloring:Coloring = colors.iter().map(|c| Some(*c)).collect();
                assert_eq!(coloring, report.coloring);
                assert!(matches!(checker(solver.instance(), &coloring), CheckerResult::Ok(_)));
            },
            SearchOutcome::Exhausted => {
                assert!(report.coloring.iter().all(Option::is_none), "{:?}", report.coloring);
            },
            SearchOutcome::Cancelled => {},
        }
    }

    #[test]
    fn test_strategy_names() {
        for strategy in Strategy::ALL.iter() {
            assert_eq!(strategy.short_name().parse::<Strategy>(), Ok(*strategy));
        }
        assert_eq!("MAC-BT".parse::<Strategy>(), Ok(Strategy::MacBacktracking));
        assert!("dsatur".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Backjumping.to_string(), "BJ");
    }

    #[test]
    fn test_path_two_colors() {
        let solver = solver(&["A", "B", "C"], &path(), 2);
        for strategy in Strategy::ALL.iter() {
            let report = solver.run(*strategy, &mut SilentObserver);
            assert_eq!(report.outcome, SearchOutcome::Solved(vec![0, 1, 0]), "{}", strategy);
            assert_sound(&solver, &report);
        }
    }

    #[test]
    fn test_triangle_two_colors() {
        let solver = solver(&["A", "B", "C"], &triangle(), 2);
        for strategy in Strategy::ALL.iter() {
            let report = solver.run(*strategy, &mut SilentObserver);
            assert_eq!(report.outcome, SearchOutcome::Exhausted, "{}", strategy);
            assert_sound(&solver, &report);
        }
    }

    #[test]
    fn test_triangle_three_colors() {
        let solver = solver(&["A", "B", "C"], &triangle(), 3);
        for strategy in Strategy::ALL.iter() {
            let report = solver.run(*strategy, &mut SilentObserver);
            assert_eq!(report.outcome, SearchOutcome::Solved(vec![0, 1, 2]), "{}", strategy);
            assert_eq!(checker(solver.instance(), &report.coloring), CheckerResult::Ok(3));
        }
    }

    #[test]
    fn test_australia() {
        let solver = Solver::new(Rc::new(CompactInstance::australia()), Palette::default());
        for strategy in Strategy::ALL.iter() {
            let report = solver.run(*strategy, &mut SilentObserver);
            assert!(report.is_solved(), "{}", strategy);
            assert_sound(&solver, &report);
            assert_eq!(report.coloring[0], Some(0)); // WA gets the first color
        }
        let solver = Solver::new(Rc::new(CompactInstance::australia()), Palette::with_nb_colors(2).unwrap());
        for strategy in Strategy::ALL.iter() {
            assert!(!solver.run_search(*strategy), "{}", strategy);
        }
    }

    #[test]
    fn test_strategies_agree() {
        let instances = [
            ("insts/grid-instances/grid2x2", InstanceFormat::Dimacs),
            ("insts/other-instances/triangle.col", InstanceFormat::Dimacs),
            ("insts/other-instances/peterson.col", InstanceFormat::Dimacs),
            ("insts/other-instances/k4.col", InstanceFormat::Dimacs),
            ("insts/australia.json", InstanceFormat::Json),
            ("insts/path3.json", InstanceFormat::Json),
            ("insts/triangle.json", InstanceFormat::Json),
        ];
        let expected_chromatic_numbers = [2, 3, 3, 4, 3, 2, 3];
        for ((filename, format), chi) in instances.iter().zip(expected_chromatic_numbers.iter()) {
            for k in 1..=4 {
                let solver = solver_from_file(filename, *format, k);
                for strategy in Strategy::ALL.iter() {
                    let report = solver.run(*strategy, &mut SilentObserver);
                    assert_eq!(report.is_solved(), k >= *chi, "{} k={} {}", filename, k, strategy);
                    assert_sound(&solver, &report);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_steps() {
        let solver = solver_from_file("insts/other-instances/peterson.col", InstanceFormat::Dimacs, 3);
        for strategy in Strategy::ALL.iter() {
            let mut first = StepRecorder::default();
            let mut second = StepRecorder::default();
            let first_report = solver.run(*strategy, &mut first);
            let second_report = solver.run(*strategy, &mut second);
            assert!(!first.steps.is_empty());
            assert_eq!(first.steps, second.steps, "{}", strategy);
            assert_eq!(first_report.outcome, second_report.outcome);
            assert_eq!(first_report.stats, second_report.stats);
        }
    }

    #[test]
    fn test_steps_replay_to_coloring() {
        let solver = solver_from_file("insts/other-instances/k4.col", InstanceFormat::Dimacs, 3);
        for strategy in Strategy::ALL.iter() {
            let mut recorder = StepRecorder::default();
            let report = solver.run(*strategy, &mut recorder);
            let mut coloring = vec![None ; 4];
            for step in &recorder.steps {
                coloring[step.vertex] = step.color;
            }
            assert_eq!(coloring, report.coloring, "{}", strategy);
            let stats = &report.stats;
            assert_eq!(stats.nb_assignments + stats.nb_unassignments, recorder.steps.len());
            assert_eq!(stats.nb_assignments, stats.nb_unassignments, "{}", strategy);
        }
    }

    #[test]
    fn test_cancellation() {
        let solver = solver_from_file("insts/other-instances/k4.col", InstanceFormat::Dimacs, 3);
        for strategy in Strategy::ALL.iter() {
            let mut nb_steps = 0;
            let mut observer = |_:&Step| -> ControlFlow<()> {
                nb_steps += 1;
                if nb_steps == 5 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
            };
            let report = solver.run(*strategy, &mut observer);
            assert_eq!(report.outcome, SearchOutcome::Cancelled, "{}", strategy);
            assert_eq!(report.stats.nb_assignments + report.stats.nb_unassignments, 5);
            assert_eq!(nb_steps, 5);
        }
    }

    #[test]
    fn test_pruning_reduces_steps() {
        let solver = solver_from_file("insts/other-instances/k4.col", InstanceFormat::Dimacs, 3);
        let bt = solver.run(Strategy::Backtracking, &mut SilentObserver);
        let mac = solver.run(Strategy::MacBacktracking, &mut SilentObserver);
        let bj = solver.run(Strategy::Backjumping, &mut SilentObserver);
        assert!(mac.stats.nb_assignments <= bt.stats.nb_assignments);
        assert!(bj.stats.nb_assignments <= bt.stats.nb_assignments);
        assert!(mac.stats.nb_revisions > 0);
        assert_eq!(bt.stats.nb_revisions, 0);
    }
}
