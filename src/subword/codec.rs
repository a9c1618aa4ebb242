use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::config::SubwordConfig;
use crate::error::{PipelineError, Result};
use crate::output;
use super::{SentencePieceModel, SubwordModel};

/// Direction of a line transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    fn apply(self, model: &dyn SubwordModel, line: &str) -> Result<String> {
        match self {
            Direction::Encode => encode_with(model, line),
            Direction::Decode => decode_with(model, line),
        }
    }
}

fn encode_with(model: &dyn SubwordModel, text: &str) -> Result<String> {
    let pieces = model.encode_pieces(text.trim())?;
    Ok(pieces.join(" "))
}

fn decode_with(model: &dyn SubwordModel, tokens: &str) -> Result<String> {
    let pieces: Vec<String> = tokens.split_whitespace().map(str::to_owned).collect();
    model.decode_pieces(&pieces)
}

/// Line-oriented subword encoder/decoder bound to one model
#[derive(Clone)]
pub struct SubwordCodec {
    model: Arc<dyn SubwordModel>,
    workers: usize,
}

impl SubwordCodec {
    pub fn new(model: Arc<dyn SubwordModel>, workers: usize) -> Self {
        Self {
            model,
            workers: workers.max(1),
        }
    }

    /// Load a SentencePiece model and size the pool from config
    pub fn open<P: AsRef<Path>>(path: P, config: &SubwordConfig) -> Result<Self> {
        let model = SentencePieceModel::open(path)?;
        let workers = config.effective_workers();
        debug!("Subword codec for {} with {} worker(s)", model.path().display(), workers);
        Ok(Self::new(Arc::new(model), workers))
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Trim, segment and space-join one line
    pub fn encode(&self, text: &str) -> Result<String> {
        encode_with(self.model.as_ref(), text)
    }

    /// Split on whitespace and detokenize one line
    pub fn decode(&self, tokens: &str) -> Result<String> {
        decode_with(self.model.as_ref(), tokens)
    }

    pub async fn encode_lines(&self, lines: Vec<String>) -> Result<Vec<String>> {
        self.transform_lines(lines, Direction::Encode).await
    }

    pub async fn decode_lines(&self, lines: Vec<String>) -> Result<Vec<String>> {
        self.transform_lines(lines, Direction::Decode).await
    }

    /// Encode every line of `input`, writing to `output` or stdout
    pub async fn encode_file(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        self.transform_file(input, output, Direction::Encode).await
    }

    /// Decode every line of `input`, writing to `output` or stdout
    pub async fn decode_file(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        self.transform_file(input, output, Direction::Decode).await
    }

    async fn transform_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        direction: Direction,
    ) -> Result<()> {
        if !input.is_file() {
            return Err(PipelineError::FileNotFound(input.display().to_string()));
        }

        let content = fs::read_to_string(input).await?;
        let lines: Vec<String> = content.lines().map(str::to_owned).collect();
        let line_count = lines.len();

        let transformed = self.transform_lines(lines, direction).await?;

        match output {
            Some(path) => {
                let mut buf = Vec::with_capacity(content.len());
                output::write_lines(&mut buf, &transformed)?;
                fs::write(path, buf).await?;
                info!(
                    "{:?}d {} line(s): {} -> {}",
                    direction,
                    line_count,
                    input.display(),
                    path.display()
                );
            }
            None => {
                output::print_lines(&transformed)?;
            }
        }

        Ok(())
    }

    /// Split lines into at most `workers` contiguous chunks, run each on the
    /// blocking pool and join the results back in chunk order.
    async fn transform_lines(
        &self,
        lines: Vec<String>,
        direction: Direction,
    ) -> Result<Vec<String>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let total = lines.len();
        let chunk_size = total.div_ceil(self.workers.min(total));
        debug!("{:?} {} line(s) with chunks of {}", direction, total, chunk_size);

        let mut handles = Vec::with_capacity(total.div_ceil(chunk_size));
        let mut remaining = lines.into_iter();
        loop {
            let chunk: Vec<String> = remaining.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }

            let model = Arc::clone(&self.model);
            handles.push(tokio::task::spawn_blocking(move || {
                chunk
                    .iter()
                    .map(|line| direction.apply(model.as_ref(), line))
                    .collect::<Result<Vec<String>>>()
            }));
        }

        let mut results = Vec::with_capacity(total);
        for handle in handles {
            let chunk = handle.await.map_err(|e| {
                PipelineError::Worker(format!("{:?} worker failed: {}", direction, e))
            })??;
            results.extend(chunk);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subword::WORD_BOUNDARY;
    use std::time::Duration;

    /// Whitespace segmentation with SentencePiece style boundary markers
    struct WordModel {
        jitter: bool,
    }

    impl SubwordModel for WordModel {
        fn encode_pieces(&self, text: &str) -> Result<Vec<String>> {
            if self.jitter {
                // later lines finish first
                let delay = 5u64.saturating_sub(text.len() as u64 % 6);
                std::thread::sleep(Duration::from_millis(delay));
            }
            if text.contains('\u{0}') {
                return Err(PipelineError::Subword("NUL in input".to_string()));
            }
            Ok(text
                .split_whitespace()
                .map(|w| format!("{}{}", WORD_BOUNDARY, w))
                .collect())
        }

        fn decode_pieces(&self, pieces: &[String]) -> Result<String> {
            let joined: String = pieces.concat();
            Ok(joined.replace(WORD_BOUNDARY, " ").trim_start().to_string())
        }
    }

    fn codec(workers: usize) -> SubwordCodec {
        SubwordCodec::new(Arc::new(WordModel { jitter: false }), workers)
    }

    #[test]
    fn test_encode_trims_and_joins() {
        let codec = codec(1);
        assert_eq!(codec.encode("  hello world \n").unwrap(), "▁hello ▁world");
        assert_eq!(codec.encode("").unwrap(), "");
    }

    #[test]
    fn test_decode_splits_on_whitespace() {
        let codec = codec(1);
        assert_eq!(codec.decode("▁hello   ▁world\n").unwrap(), "hello world");
        assert_eq!(codec.decode("").unwrap(), "");
    }

    #[test]
    fn test_reencoding_decoded_output_is_stable() {
        let codec = codec(1);
        let encoded = codec.encode("the quick brown fox").unwrap();
        let decoded = codec.decode(&encoded).unwrap();
        assert_eq!(codec.encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_zero_workers_is_clamped() {
        assert_eq!(codec(0).workers(), 1);
    }

    #[test]
    fn test_lines_keep_order_under_jitter() {
        let codec = SubwordCodec::new(Arc::new(WordModel { jitter: true }), 7);
        let lines: Vec<String> = (0..97).map(|i| format!("line {} {}", i, "x".repeat(i % 11))).collect();

        let encoded = tokio_test::block_on(codec.encode_lines(lines.clone())).unwrap();

        assert_eq!(encoded.len(), lines.len());
        for (i, (line, plain)) in encoded.iter().zip(&lines).enumerate() {
            assert_eq!(line, &codec.encode(plain).unwrap(), "line {} out of order", i);
        }
    }

    #[tokio::test]
    async fn test_empty_lines_are_preserved() {
        let codec = codec(4);
        let lines = vec!["a b".to_string(), String::new(), "c".to_string()];
        let encoded = codec.encode_lines(lines).await.unwrap();
        assert_eq!(encoded, vec!["▁a ▁b", "", "▁c"]);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let codec = codec(2);
        let lines = vec!["fine".to_string(), "bad\u{0}".to_string()];
        let result = codec.encode_lines(lines).await;
        assert!(matches!(result, Err(PipelineError::Subword(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_file_round_trip_has_same_line_count() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let encoded = dir.path().join("encoded.txt");
        let decoded = dir.path().join("decoded.txt");

        let input: String = (0..250).map(|i| format!("sentence number {}\n", i)).collect();
        std::fs::write(&plain, &input).unwrap();

        let codec = SubwordCodec::new(Arc::new(WordModel { jitter: true }), 8);
        codec.encode_file(&plain, Some(&encoded)).await.unwrap();
        codec.decode_file(&encoded, Some(&decoded)).await.unwrap();

        let encoded_text = std::fs::read_to_string(&encoded).unwrap();
        assert_eq!(encoded_text.lines().count(), 250);
        assert_eq!(encoded_text.lines().nth(42), Some("▁sentence ▁number ▁42"));
        assert_eq!(std::fs::read_to_string(&decoded).unwrap(), input);
    }

    #[tokio::test]
    async fn test_empty_file_produces_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let encoded = dir.path().join("encoded.txt");
        std::fs::write(&plain, "").unwrap();

        codec(4).encode_file(&plain, Some(&encoded)).await.unwrap();
        assert_eq!(std::fs::read_to_string(&encoded).unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = codec(1).encode_file(&dir.path().join("nope.txt"), None).await;
        assert!(matches!(result, Err(PipelineError::FileNotFound(_))));
    }
}
