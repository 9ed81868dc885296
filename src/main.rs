//! Animated graph coloring (BT, MAC-BT, BJ)


// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

#[macro_use]
extern crate clap;
use clap::App;

use std::ops::ControlFlow;
use std::process;

use log::{info, warn, LevelFilter};

use graph_painter::search::{SearchOutcome, Solver, Strategy};
use graph_painter::search::observer::{CancellationToken, Cancellable, PacedObserver, Step};
use graph_painter::util::{read_params, export_results};


/// logs on stderr, warnings only unless verbose (RUST_LOG overrides it)
fn init_logger(verbose:bool) {
    let level_filter = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level_filter)
        .parse_default_env()
        .init();
}

/// SIGINT / SIGTERM cancel the running search at its next step
fn install_signal_handlers(token:&CancellationToken) {
    const TERMINATION_SIGNALS: &[std::os::raw::c_int] =
        &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];
    for signal in TERMINATION_SIGNALS {
        if let Err(e) = signal_hook::flag::register(*signal, token.flag()) {
            warn!("unable to register signal listener: {}", e);
        }
    }
}

/**
reads an instance and a palette, then colors the graph with the strategy given as subcommand,
printing each step and waiting after it.
*/
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    init_logger(main_args.is_present("verbose"));
    println!("=========================================================");
    let params = match read_params(&main_args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };
    let strategies:Vec<Strategy> = match main_args.subcommand_name() {
        None | Some("all") => Strategy::ALL.to_vec(),
        Some(name) => match name.parse() {
            Ok(strategy) => vec![strategy],
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(2);
            }
        },
    };
    let token = CancellationToken::new();
    install_signal_handlers(&token);
    info!("delay between steps: {:?}", params.delay);

    // solve it
    let solver = Solver::new(params.instance.clone(), params.palette.clone());
    let mut reports = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        println!("{}:", strategy);
        let inst = params.instance.clone();
        let palette = params.palette.clone();
        let quiet = params.quiet;
        let printer = move |step:&Step| -> ControlFlow<()> {
            if !quiet {
                match step.color {
                    Some(c) => println!("\t{:<20} <- {}", inst.label(step.vertex), palette.token(c)),
                    None => println!("\t{:<20} <- (none)", inst.label(step.vertex)),
                }
            }
            ControlFlow::Continue(())
        };
        let mut observer = Cancellable::new(PacedObserver::new(printer, params.delay), token.clone());
        let report = solver.run(strategy, &mut observer);
        match &report.outcome {
            SearchOutcome::Solved(colors) => {
                println!("{} found a coloring:", strategy);
                for (v, c) in colors.iter().enumerate() {
                    println!("\t{:<20} {}", params.instance.label(v), params.palette.token(*c));
                }
            },
            SearchOutcome::Exhausted => println!("{}: no coloring with {} colors", strategy, params.palette.len()),
            SearchOutcome::Cancelled => println!("{}: cancelled", strategy),
        }
        println!("\t{} assignments, {} unassignments, {} revisions, {} backjumps",
            report.stats.nb_assignments,
            report.stats.nb_unassignments,
            report.stats.nb_revisions,
            report.stats.nb_backjumps,
        );
        reports.push(report);
        if token.is_cancelled() { break; }
    }

    // export results
    if let Err(e) = export_results(&params, &reports) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
