use bha::cli::{self, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
