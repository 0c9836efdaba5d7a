mod cli;
mod commands;
mod error;

use structopt::StructOpt;
use tracing::Level;

use cli::{CliOpts, Commands};

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(opts: CliOpts) -> error::Result<()> {
    let verbose = opts.verbose;

    match opts.cmd {
        Commands::Create(args) => commands::create(args, verbose),
        Commands::List(args) => commands::list(args),
        Commands::Get(args) => commands::get(args),
        Commands::Extract(args) => commands::extract(args, verbose),
    }
}

fn main() {
    let opts = CliOpts::from_iter(wild::args_os());
    init_logging(opts.verbose);

    if let Err(e) = run(opts) {
        eprintln!("{:?}", anyhow::Error::new(e));
        std::process::exit(1);
    }
}
