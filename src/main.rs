use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Set { ref id, ref value } => {
            credvault::cli::commands::set::execute(&cli, id, value.as_deref())
        }
        Commands::Get { ref id } => credvault::cli::commands::get::execute(&cli, id),
        Commands::List => credvault::cli::commands::list::execute(&cli),
        Commands::Delete { ref id, force } => {
            credvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::RotatePassphrase => credvault::cli::commands::rotate::execute(&cli),
        Commands::Status => credvault::cli::commands::status::execute(&cli),
        Commands::Audit { last, ref since } => {
            credvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => {
            credvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
