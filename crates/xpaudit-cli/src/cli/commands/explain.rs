use xpaudit_core::{audit_composition, load_paths};

use crate::cli::args::ExplainArgs;
use crate::exit_codes;

/// Print every verdict to stdout. Nothing is written to disk.
pub fn run(args: ExplainArgs) -> anyhow::Result<i32> {
    let comps = match load_paths(&args.paths) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load compositions: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    for comp in &comps {
        match audit_composition(comp) {
            Some(verdict) => println!("{}", verdict),
            None => println!("Name: {}\nMode: {} (not audited)\n", comp.name, comp.mode),
        }
    }
    Ok(exit_codes::OK)
}
