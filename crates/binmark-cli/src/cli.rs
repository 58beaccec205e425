use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Permutation seed shared between embedding and extraction
    #[arg(long, global = true, default_value_t = binmark_core::DEFAULT_SEED)]
    pub seed: u64,

    /// File caching the flippability table between runs
    #[arg(long = "table-cache", global = true, value_name = "file")]
    pub table_cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Embed(embed::EmbedArgs),
    Extract(extract::ExtractArgs),
    Verify(verify::VerifyArgs),
}
