use super::args::*;

pub mod audit;
pub mod explain;

use crate::exit_codes;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Audit(args) => audit::run(args),
        Command::Explain(args) => explain::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
