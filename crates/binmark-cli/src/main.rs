use clap::Parser;

use binmark_core::{BinmarkError, CodecOptions};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub(crate) type CliResult<T> = Result<T, BinmarkError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    log::debug!("permutation seed {}", args.seed);

    let options = CodecOptions {
        seed: args.seed,
        ..CodecOptions::default()
    };

    match args.command {
        Commands::Embed(cmd) => cmd.run(options, args.table_cache)?,
        Commands::Extract(cmd) => cmd.run(options)?,
        Commands::Verify(cmd) => {
            if !cmd.run(options)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
