// Translation pipeline
//
// - Command: argument-vector builder and runner for the external translator
// - Onmt: engine invoking an OpenNMT style `onmt_translate` executable
// - Pipeline: stage -> encode -> translate -> decode -> deliver

pub mod command;
pub mod onmt;
pub mod pipeline;

use async_trait::async_trait;
use std::path::Path;

pub use command::TranslatorCommand;
pub use onmt::OnmtEngine;
pub use pipeline::*;

use crate::error::Result;

/// Backend turning a file of source tokens into a file of target tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate `src` (one token sequence per line) into `output` using `model`
    async fn translate_file(&self, model: &Path, src: &Path, output: &Path) -> Result<()>;
}
