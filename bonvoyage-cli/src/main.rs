//! Entry point for the `bonvoyage` command-line interface.
#![forbid(unsafe_code)]

use bonvoyage_cli::CliError;

fn main() {
    match bonvoyage_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("bonvoyage: {err}");
            std::process::exit(1);
        }
    }
}
