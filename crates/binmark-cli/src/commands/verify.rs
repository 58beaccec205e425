use std::fs;
use std::path::PathBuf;

use clap::Args;

use binmark_core::CodecOptions;

use crate::CliResult;

/// Checks a marked image against an expected payload
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Marked image that carries the payload
    #[arg(short = 'i', long = "in", value_name = "marked image", required = true)]
    pub marked: PathBuf,

    /// File with the expected payload bytes
    #[arg(short = 'd', long = "data", value_name = "data file", required = true)]
    pub expected: PathBuf,
}

impl VerifyArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<bool> {
        let expected = fs::read(&self.expected)?;
        let matched = binmark_core::commands::verify(&self.marked, &expected, &options)?;

        println!("{}", if matched { "MATCH" } else { "NO MATCH" });
        Ok(matched)
    }
}
