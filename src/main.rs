//! onmt-translate
//!
//! Translates a quoted text or a file of lines: the input is encoded with the
//! source subword model, run through `onmt_translate` and decoded with the
//! target subword model.

use anyhow::Result;
use tracing::{debug, info};

use nmt_pipeline::cli::TranslateArgs;
use nmt_pipeline::config::Config;
use nmt_pipeline::logging::setup_logging;
use nmt_pipeline::output::print_lines;
use nmt_pipeline::translate::{TranslationInput, TranslationOutput, TranslationPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let args = TranslateArgs::parse_args();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(translator) = &args.translator {
        config.translator.binary_path = translator.clone();
    }

    let _guard = setup_logging("onmt-translate", args.verbose, &config.logging)?;
    debug!("Configuration: {:?}", config);

    let pipeline = TranslationPipeline::from_config(
        &config,
        &args.model,
        &args.model_src_subword,
        &args.model_tgt_subword,
    )?;

    info!("Translating with model {}", pipeline.model().display());
    let input = TranslationInput::from_arg(&args.text);
    match pipeline.translate(input, args.output.as_deref()).await? {
        TranslationOutput::Lines(lines) => print_lines(&lines)?,
        TranslationOutput::Written(path) => info!("Translation written to {}", path.display()),
    }

    Ok(())
}
