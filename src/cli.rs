use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Two-letter single-dash flags accepted for compatibility with the
/// `onmt_translate` wrapper scripts, mapped to their long spellings.
const SINGLE_DASH_FLAGS: [(&str, &str); 2] = [("-ms", "--ms"), ("-mt", "--mt")];

/// Translate text or a file with an OpenNMT model
#[derive(Parser, Debug)]
#[command(name = "onmt-translate", author, version, about, long_about = None)]
pub struct TranslateArgs {
    /// A quoted text string, or a file containing one text per line
    pub text: String,

    /// Path to the translation model
    #[arg(short, long)]
    pub model: PathBuf,

    /// Path to the source side subword model
    #[arg(long = "model-src-subword", visible_alias = "ms")]
    pub model_src_subword: PathBuf,

    /// Path to the target side subword model
    #[arg(long = "model-tgt-subword", visible_alias = "mt")]
    pub model_tgt_subword: PathBuf,

    /// File to save translated text, stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Translator executable, overrides the configured one
    #[arg(long)]
    pub translator: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl TranslateArgs {
    /// Parse process arguments, accepting `-ms`/`-mt` as well as `--ms`/`--mt`
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }
}

/// Rewrite `-ms`/`-mt` tokens, which clap would otherwise read as `-m s`/`-m t`
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            SINGLE_DASH_FLAGS
                .iter()
                .find(|(short, _)| arg == *short)
                .map(|(_, long)| OsString::from(*long))
                .unwrap_or(arg)
        })
        .collect()
}

/// Encode or decode text with a subword model
#[derive(Parser, Debug)]
#[command(name = "subword", author, version, about, long_about = None)]
pub struct SubwordArgs {
    /// encode: encode plain text or file; decode: decode encoded text or file
    #[arg(value_enum)]
    pub command: SubwordCommand,

    /// Path to the subword model
    #[arg(short, long)]
    pub model: PathBuf,

    /// A quoted text or a file containing lines of text
    #[arg(short, long)]
    pub input: String,

    /// File to save the result of a file input, stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of worker threads, overrides the configured count
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubwordCommand {
    Encode,
    Decode,
}
