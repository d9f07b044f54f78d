mod capture;
mod cli;
mod error;
mod fmt;
mod form;
mod models;
mod settings;
mod validator;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            file,
            require,
            strict,
        } => cli::check::run(&file, require.as_deref(), strict),
        #[cfg(feature = "tui")]
        Commands::Form { rows, require } => cli::form::run(rows, require.as_deref()),
        Commands::Demo => cli::demo::run(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Require { fields } => cli::config::require(&fields),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
