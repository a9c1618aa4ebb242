//! subword
//!
//! Encodes or decodes a quoted text or a file of lines with a SentencePiece
//! model.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use nmt_pipeline::cli::{SubwordArgs, SubwordCommand};
use nmt_pipeline::config::Config;
use nmt_pipeline::logging::setup_logging;
use nmt_pipeline::output::print_lines;
use nmt_pipeline::subword::SubwordCodec;

#[tokio::main]
async fn main() -> Result<()> {
    let args = SubwordArgs::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(workers) = args.workers {
        config.subword.workers = workers;
    }

    let _guard = setup_logging("subword", args.verbose, &config.logging)?;

    let codec = SubwordCodec::open(&args.model, &config.subword)?;
    let input = Path::new(&args.input);

    if input.is_file() {
        let output = args.output.as_deref();
        match args.command {
            SubwordCommand::Encode => codec.encode_file(input, output).await?,
            SubwordCommand::Decode => codec.decode_file(input, output).await?,
        }
    } else {
        let line = match args.command {
            SubwordCommand::Encode => codec.encode(&args.input)?,
            SubwordCommand::Decode => codec.decode(&args.input)?,
        };
        print_lines([line])?;
    }

    Ok(())
}
