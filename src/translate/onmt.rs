use async_trait::async_trait;
use std::path::Path;

use crate::config::TranslatorConfig;
use crate::error::Result;
use super::{TranslationEngine, TranslatorCommand};

/// Engine shelling out to `onmt_translate` (or a compatible executable)
pub struct OnmtEngine {
    config: TranslatorConfig,
}

impl OnmtEngine {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Build the invocation for one translation run
    pub fn command(&self, model: &Path, src: &Path, output: &Path) -> TranslatorCommand {
        TranslatorCommand::new(&self.config.binary_path)
            .model(model)
            .src(src)
            .output(output)
            .min_length(self.config.min_length)
            .gpu(self.config.gpu)
            .args(&self.config.extra_args)
    }
}

#[async_trait]
impl TranslationEngine for OnmtEngine {
    async fn translate_file(&self, model: &Path, src: &Path, output: &Path) -> Result<()> {
        self.command(model, src, output).execute().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_uses_config() {
        let engine = OnmtEngine::new(TranslatorConfig {
            binary_path: "/usr/local/bin/onmt_translate".to_string(),
            min_length: 2,
            gpu: 0,
            extra_args: vec!["-replace_unk".to_string()],
        });

        let cmd = engine.command(Path::new("m.pt"), Path::new("in.txt"), Path::new("out.txt"));
        assert_eq!(
            cmd.display(),
            "/usr/local/bin/onmt_translate -model m.pt -src in.txt -output out.txt -min_length 2 -gpu 0 -replace_unk"
        );
    }
}
