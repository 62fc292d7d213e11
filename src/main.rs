use clap::Parser;
use std::process;

use taskboard::cli::commands::{Cli, Commands};
use taskboard::cli;
use taskboard::config::Config;
use taskboard::filter::TaskFilter;
use taskboard::logging;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    if let Err(e) = logging::init_tracing(cli_args.verbose, cli_args.quiet) {
        eprintln!("Warning: {e:#}");
    }

    let config = match Config::resolve(cli_args.store.as_deref()) {
        Ok(config) => config,
        Err(e) => process::exit(cli::finish(Err(e), json_output)),
    };

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&config, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, &config, json_output),
        Commands::List { search, status, priority } => {
            let filter = TaskFilter { search, status, priority };
            cli::board::run(&config, filter, json_output)
        }
        Commands::Status => cli::status::run(&config, json_output),
    };

    process::exit(exit_code);
}
