use std::fs;
use std::path::PathBuf;

use clap::Args;

use binmark_core::{CodecOptions, ShortfallPolicy};

use crate::CliResult;

/// Hides a payload in a PBM image
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Cover image, a black-and-white PBM file, used readonly.
    #[arg(short = 'i', long = "in", value_name = "cover image", required = true)]
    pub cover: PathBuf,

    /// Marked image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image",
        required = true
    )]
    pub output: PathBuf,

    /// File with the payload bytes to hide
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_file"
    )]
    pub message: Option<String>,

    /// Fail instead of warning when a window cannot take all its flips
    #[arg(long)]
    pub strict: bool,
}

impl EmbedArgs {
    pub fn run(self, mut options: CodecOptions, table_cache: Option<PathBuf>) -> CliResult<()> {
        if self.strict {
            options.shortfall = ShortfallPolicy::Fail;
        }

        let payload = match (&self.data_file, &self.message) {
            (Some(path), _) => fs::read(path)?,
            (None, Some(text)) => text.clone().into_bytes(),
            (None, None) => unreachable!("clap requires data or message"),
        };

        let stats = binmark_core::commands::embed(
            &self.cover,
            &self.output,
            &payload,
            &options,
            table_cache.as_deref(),
        )?;

        if stats.shortfalls > 0 {
            eprintln!(
                "warning: {} of {} windows could not take all their flips",
                stats.shortfalls, stats.bits
            );
        }
        println!(
            "embedded {} bytes into {} ({} pixels flipped)",
            payload.len(),
            self.output.display(),
            stats.flipped
        );
        Ok(())
    }
}
