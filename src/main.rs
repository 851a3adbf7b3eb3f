use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kaizen_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Install(opts) => {
            logging::init_subscriber(args.verbose, "install");
            let log = Arc::new(logging::Logger::new("install"));
            commands::install::run(&opts, &log)
        }
        cli::Command::Serve(opts) => {
            logging::init_subscriber(args.verbose, "serve");
            let log = logging::Logger::new("serve");
            commands::serve::run(&opts, &log)
        }
        cli::Command::Completions(opts) => {
            commands::completions::run(&opts);
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
