use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::output;
use crate::subword::SubwordCodec;
use crate::workspace::Workspace;
use super::{OnmtEngine, TranslationEngine};

/// Text handed to the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationInput {
    /// Existing file with one record per line
    File(PathBuf),
    /// A single line
    Text(String),
    /// One record per element
    Lines(Vec<String>),
}

impl TranslationInput {
    /// Interpret a command-line argument: a path to an existing file is read
    /// as a file, anything else is translated as literal text.
    pub fn from_arg(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            TranslationInput::File(path.to_path_buf())
        } else {
            TranslationInput::Text(arg.to_string())
        }
    }
}

impl From<&str> for TranslationInput {
    fn from(text: &str) -> Self {
        TranslationInput::Text(text.to_string())
    }
}

impl From<String> for TranslationInput {
    fn from(text: String) -> Self {
        TranslationInput::Text(text)
    }
}

impl From<Vec<String>> for TranslationInput {
    fn from(lines: Vec<String>) -> Self {
        TranslationInput::Lines(lines)
    }
}

impl From<PathBuf> for TranslationInput {
    fn from(path: PathBuf) -> Self {
        TranslationInput::File(path)
    }
}

/// What a finished translation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutput {
    /// Decoded lines, in input order
    Lines(Vec<String>),
    /// Decoded text was copied to this path
    Written(PathBuf),
}

impl TranslationOutput {
    pub fn into_lines(self) -> Option<Vec<String>> {
        match self {
            TranslationOutput::Lines(lines) => Some(lines),
            TranslationOutput::Written(_) => None,
        }
    }
}

/// Source encode, external translation and target decode bound to one
/// translation model and one pair of subword models.
pub struct TranslationPipeline {
    model: PathBuf,
    source: SubwordCodec,
    target: SubwordCodec,
    engine: Box<dyn TranslationEngine>,
    workspace_root: Option<PathBuf>,
}

impl TranslationPipeline {
    pub fn new(
        model: PathBuf,
        source: SubwordCodec,
        target: SubwordCodec,
        engine: Box<dyn TranslationEngine>,
    ) -> Self {
        Self {
            model,
            source,
            target,
            engine,
            workspace_root: None,
        }
    }

    /// Create per-call workspaces under `root` instead of the system temp dir
    pub fn with_workspace_root(mut self, root: Option<PathBuf>) -> Self {
        self.workspace_root = root;
        self
    }

    /// Load both SentencePiece models and wire up the `onmt_translate` engine
    pub fn from_config(
        config: &Config,
        model: &Path,
        source_subword: &Path,
        target_subword: &Path,
    ) -> Result<Self> {
        if !model.exists() {
            return Err(PipelineError::FileNotFound(model.display().to_string()));
        }

        let source = SubwordCodec::open(source_subword, &config.subword)?;
        let target = SubwordCodec::open(target_subword, &config.subword)?;
        let engine = OnmtEngine::new(config.translator.clone());

        Ok(Self::new(model.to_path_buf(), source, target, Box::new(engine))
            .with_workspace_root(config.workspace.root.clone()))
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    /// Translate `input`. With `output` the decoded text is copied there,
    /// otherwise the decoded lines are returned.
    pub async fn translate(
        &self,
        input: TranslationInput,
        output: Option<&Path>,
    ) -> Result<TranslationOutput> {
        let start = Instant::now();
        let workspace = Workspace::create(self.workspace_root.as_deref())?;

        let plain = Self::stage(input, &workspace).await?;

        let encoded = workspace.encoded();
        self.source.encode_file(&plain, Some(&encoded)).await?;

        let translated = workspace.translated();
        self.engine.translate_file(&self.model, &encoded, &translated).await?;

        let decoded = workspace.decoded();
        self.target.decode_file(&translated, Some(&decoded)).await?;

        let delivered = match output {
            Some(path) => {
                fs::copy(&decoded, path).await?;
                TranslationOutput::Written(path.to_path_buf())
            }
            None => {
                let content = fs::read_to_string(&decoded).await?;
                TranslationOutput::Lines(content.lines().map(str::to_owned).collect())
            }
        };

        info!("[succeed] succeed. cost: {:.2} second(s)", start.elapsed().as_secs_f64());
        Ok(delivered)
    }

    async fn stage(input: TranslationInput, workspace: &Workspace) -> Result<PathBuf> {
        let lines = match input {
            TranslationInput::File(path) => {
                if !path.is_file() {
                    return Err(PipelineError::FileNotFound(path.display().to_string()));
                }
                debug!("Using {} as plain text source", path.display());
                return Ok(path);
            }
            TranslationInput::Text(text) => vec![text],
            TranslationInput::Lines(lines) => lines,
        };

        let plain = workspace.plain();
        let mut buf = Vec::new();
        output::write_lines(&mut buf, &lines)?;
        fs::write(&plain, buf).await?;

        debug!("Staged {} line(s) into {}", lines.len(), plain.display());
        Ok(plain)
    }
}
