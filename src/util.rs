use std::fs;
use std::rc::Rc;
use std::time::Duration;

use clap::ArgMatches;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    color::{ColoringInstance, ColorId, Palette, checker, CheckerResult},
    compact_instance::{CompactInstance, InstanceFormat},
    error::GraphError,
    search::{SearchOutcome, SearchReport},
};

/// delay between two steps when none is given (ms)
pub const DEFAULT_DELAY_MS:u64 = 500;

/** errors on the command line parameters */
#[derive(Error, Debug)]
pub enum ParamError {
    /// the instance or the palette cannot be built
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// the instance type is neither json nor dimacs
    #[error("unrecognized instance type {0} (valid: 'json', 'dimacs')")]
    UnknownInstanceType(String),
    /// the delay is not a positive integer
    #[error("invalid delay {0} (expected a positive number of milliseconds)")]
    InvalidDelay(String),
    /// the number of colors is not a positive integer
    #[error("invalid number of colors {0}")]
    InvalidNbColors(String),
}

/** parameters shared by the executables */
#[derive(Debug)]
pub struct Params {
    /// instance file (None: map of Australia)
    pub inst_filename: Option<String>,
    /// instance to color
    pub instance: Rc<dyn ColoringInstance>,
    /// colors to try
    pub palette: Palette,
    /// delay after each step
    pub delay: Duration,
    /// where to write the coloring
    pub sol_file: Option<String>,
    /// where to write the statistics
    pub perf_file: Option<String>,
    /// if true, steps are not printed
    pub quiet: bool,
}

/** reads the instance described by the command line ("instance" and "type" arguments) */
pub fn read_instance(main_args:&ArgMatches) -> Result<(Option<String>, Rc<dyn ColoringInstance>), ParamError> {
    let instance_type = main_args.value_of("type").unwrap_or("json");
    let format = match instance_type {
        "json" => InstanceFormat::Json,
        "dimacs" => InstanceFormat::Dimacs,
        _ => return Err(ParamError::UnknownInstanceType(instance_type.to_string())),
    };
    Ok(match main_args.value_of("instance") {
        None => (None, Rc::new(CompactInstance::australia())),
        Some(filename) => (
            Some(filename.to_string()),
            Rc::new(CompactInstance::from_file(filename, format)?)
        ),
    })
}

/** reads the palette ("palette" or "colors" arguments, default palette otherwise) */
pub fn read_palette(main_args:&ArgMatches) -> Result<Palette, ParamError> {
    if let Some(tokens) = main_args.value_of("palette") {
        return Ok(Palette::parse(tokens)?);
    }
    match main_args.value_of("colors") {
        None => Ok(Palette::default()),
        Some(k) => {
            let k = k.parse::<usize>().map_err(|_| ParamError::InvalidNbColors(k.to_string()))?;
            Ok(Palette::with_nb_colors(k)?)
        }
    }
}

/** reads command line input and returns the parameters of the run */
pub fn read_params(main_args:&ArgMatches) -> Result<Params, ParamError> {
    let (inst_filename, instance) = read_instance(main_args)?;
    let palette = read_palette(main_args)?;
    let delay = match main_args.value_of("delay") {
        None => Duration::from_millis(DEFAULT_DELAY_MS),
        Some(d) => match d.parse::<u64>() {
            Ok(ms) if ms > 0 => Duration::from_millis(ms),
            _ => return Err(ParamError::InvalidDelay(d.to_string())),
        },
    };
    let sol_file = main_args.value_of("solution").map(|e| {
        println!("printing solutions in: {}", e);
        e.to_string()
    });
    let perf_file = main_args.value_of("perf").map(|e| {
        println!("printing perfs in: {}\n", e);
        e.to_string()
    });
    instance.display_statistics();
    println!("=======================");
    Ok(Params {
        inst_filename,
        instance,
        palette,
        delay,
        sol_file,
        perf_file,
        quiet: main_args.is_present("quiet"),
    })
}

/** writes a string encoding the coloring: one "vertex color" line per colored vertex */
pub fn solution_to_string(inst:&dyn ColoringInstance, palette:&Palette, coloring:&[Option<ColorId>]) -> String {
    let mut res = String::default();
    for v in inst.vertices() {
        if let Some(c) = coloring[v] {
            res += format!("{} {}\n", inst.name(v), palette.token(c)).as_str();
        }
    }
    res
}

/** reads a coloring written by `solution_to_string`. Vertices absent from the file stay uncolored. */
pub fn read_solution(inst:&dyn ColoringInstance, palette:&Palette, filename:&str) -> Result<Vec<Option<ColorId>>, GraphError> {
    let s = fs::read_to_string(filename).map_err(|source| GraphError::Io {
        filename: filename.to_string(),
        source,
    })?;
    parse_solution(inst, palette, &s)
}

/// parses "vertex color" lines
pub fn parse_solution(inst:&dyn ColoringInstance, palette:&Palette, s:&str) -> Result<Vec<Option<ColorId>>, GraphError> {
    let mut coloring = vec![None ; inst.nb_vertices()];
    for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut fields = line.split_whitespace();
        let (name, token) = match (fields.next(), fields.next()) {
            (Some(name), Some(token)) => (name, token),
            _ => return Err(GraphError::UnknownColor { vertex: line.to_string(), color: String::default() }),
        };
        let v = inst.vertex_by_name(name).ok_or_else(|| GraphError::UnknownVertex {
            from: name.to_string(),
            to: token.to_string(),
            unknown: name.to_string(),
        })?;
        let c = palette.color_of(token).ok_or_else(|| GraphError::UnknownColor {
            vertex: name.to_string(),
            color: token.to_string(),
        })?;
        coloring[v] = Some(c);
    }
    Ok(coloring)
}

/// statistics of a run, as exported in the perf file
pub fn report_to_json(inst_name:&str, palette:&Palette, report:&SearchReport) -> Value {
    let outcome = match report.outcome {
        SearchOutcome::Solved(_) => "solved",
        SearchOutcome::Exhausted => "exhausted",
        SearchOutcome::Cancelled => "cancelled",
    };
    json!({
        "inst_name": inst_name,
        "strategy": report.strategy.short_name(),
        "nb_colors": palette.len(),
        "outcome": outcome,
        "stats": report.stats,
        "time_searched": report.time_searched,
    })
}

/// exports search results to files
pub fn export_results(params:&Params, reports:&[SearchReport]) -> Result<(), GraphError> {
    let inst_name = params.inst_filename.as_deref().unwrap_or("australia");
    // export statistics
    if let Some(filename) = &params.perf_file {
        let stats:Vec<Value> = reports.iter()
            .map(|report| report_to_json(inst_name, &params.palette, report))
            .collect();
        fs::write(filename, serde_json::to_string(&stats)?).map_err(|source| GraphError::Io {
            filename: filename.clone(),
            source,
        })?;
    }
    // export the first coloring found
    if let Some(filename) = &params.sol_file {
        if let Some(report) = reports.iter().find(|report| report.is_solved()) {
            let inst = params.instance.as_ref();
            match checker(inst, &report.coloring) {
                CheckerResult::Ok(_) => {},
                checker_result => { println!("invalid solution (reason: {:?})", checker_result) }
            };
            fs::write(filename, solution_to_string(inst, &params.palette, &report.coloring))
                .map_err(|source| GraphError::Io { filename: filename.clone(), source })?;
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::search::{Solver, Strategy};
    use crate::search::observer::SilentObserver;

    #[test]
    fn test_solution_round_trip() {
        let inst = CompactInstance::australia();
        let palette = Palette::default();
        let coloring = vec![Some(0), Some(1), Some(2), Some(0), Some(1), Some(0), None];
        let s = solution_to_string(&inst, &palette, &coloring);
        assert!(s.starts_with("WA #FF5733\nNT #4CAF50\n"));
        assert_eq!(parse_solution(&inst, &palette, &s).unwrap(), coloring);
    }

    #[test]
    fn test_parse_solution_errors() {
        let inst = CompactInstance::australia();
        let palette = Palette::default();
        assert!(matches!(parse_solution(&inst, &palette, "XX #FF5733"), Err(GraphError::UnknownVertex { .. })));
        assert!(matches!(parse_solution(&inst, &palette, "WA pink"), Err(GraphError::UnknownColor { .. })));
        assert!(matches!(parse_solution(&inst, &palette, "WA"), Err(GraphError::UnknownColor { .. })));
    }

    #[test]
    fn test_report_to_json() {
        let solver = Solver::new(Rc::new(CompactInstance::australia()), Palette::default());
        let report = solver.run(Strategy::Backjumping, &mut SilentObserver);
        let value = report_to_json("australia", solver.palette(), &report);
        assert_eq!(value["strategy"], "bj");
        assert_eq!(value["outcome"], "solved");
        assert_eq!(value["nb_colors"], 3);
        assert_eq!(value["stats"]["nb_assignments"], report.stats.nb_assignments);
    }
}
