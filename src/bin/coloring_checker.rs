use std::process;

use clap::{App, load_yaml};

use graph_painter::{
    color::{checker, CheckerResult},
    util::{read_instance, read_palette, read_solution},
};

/** checks a coloring file against an instance */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("coloring_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let sol_filename = main_args.value_of("solution").unwrap_or_default();
    // read files
    let loaded = read_instance(&main_args).and_then(|(_, instance)| {
        let palette = read_palette(&main_args)?;
        Ok((instance, palette))
    });
    let (instance, palette) = match loaded {
        Ok(res) => res,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    };
    let coloring = match read_solution(instance.as_ref(), &palette, sol_filename) {
        Ok(coloring) => coloring,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    };
    // call checker
    match checker(instance.as_ref(), &coloring) {
        CheckerResult::Ok(n) => {
            println!("{}", n);
        },
        CheckerResult::VertexNotColored(v) => {
            println!("ERROR: vertex {} not colored", instance.name(v));
            process::exit(1);
        },
        CheckerResult::ConflictingEdge(a, b) => {
            println!("ERROR: vertices {} and {} are conflicting", instance.name(a), instance.name(b));
            process::exit(1);
        },
    };
}
