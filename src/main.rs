use clap::Parser;
use std::process;

use taskboard::cli::commands::{Cli, Commands};
use taskboard::cli;
use taskboard::config::Config;
use taskboard::logging;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let config = match Config::resolve(cli_args.db.as_deref()) {
        Ok(config) => config,
        Err(e) => process::exit(cli::report_error(&e, json_output)),
    };
    if let Err(e) = logging::init_logging(&config.log_level(cli_args.log_level.as_deref())) {
        eprintln!("warning: logging disabled: {e}");
    }

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&config, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, &config, json_output),
        Commands::Shell => cli::shell::run(&config),
    };

    process::exit(exit_code);
}
