extern crate env_logger;
#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

use dnapool::cli::{self, Cli, Commands};
use dnapool::{pack, summary};

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("dnapool v{}", cli::VERSION);

    match &cli.command {
        Commands::Pack {
            input,
            output,
            ranges,
            threads,
        } => {
            pack::construct_pool(input, output, ranges, *threads)?;
            info!("Completed successfully.")
        }
        Commands::Summary { ranges } => {
            summary::summarize(ranges)?;
        }
    };
    Ok(())
}

fn main() {
    let Err(err) = try_main() else {
        return;
    };

    // the top-level message, then every underlying cause
    for (depth, cause) in err.chain().enumerate() {
        match depth {
            0 => error!("{cause}"),
            _ => error!("  because: {cause}"),
        }
    }
    std::process::exit(1);
}
