use std::fs;
use std::path::PathBuf;

use clap::Args;

use binmark_core::CodecOptions;

use crate::CliResult;

/// Recovers the hidden payload from a marked image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Marked image that carries the payload
    #[arg(short = 'i', long = "in", value_name = "marked image", required = true)]
    pub marked: PathBuf,

    /// Recovered payload will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output: PathBuf,
}

impl ExtractArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let payload = binmark_core::commands::extract(&self.marked, &options)?;
        fs::write(&self.output, &payload)?;

        println!(
            "recovered {} bytes into {}",
            payload.len(),
            self.output.display()
        );
        Ok(())
    }
}
