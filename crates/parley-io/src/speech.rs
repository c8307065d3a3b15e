use std::process::Stdio;

use async_trait::async_trait;
use parley_config::speech::CommandSpec;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::command::{expand_args, program_available};

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str, lang: &str) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen once. `None` when the session ended without speech or was cancelled.
    async fn recognize(
        &self,
        lang: &str,
        cancel: CancellationToken,
    ) -> anyhow::Result<Option<String>>;
}

/// Speaks through an external TTS program, `espeak-ng` by default
pub struct CommandSynthesizer {
    spec: CommandSpec,
}

impl CommandSynthesizer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str, lang: &str) -> anyhow::Result<()> {
        let voice = voice_for(lang);
        let args = expand_args(&self.spec, &[("lang", voice.as_str()), ("text", text)]);

        let status = Command::new(&self.spec.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", self.spec.program, status);
        }

        Ok(())
    }
}

/// espeak voices are lowercase (`en-gb`)
fn voice_for(lang: &str) -> String {
    lang.to_lowercase()
}

/// Runs an external recognizer that prints one transcript on stdout
pub struct CommandRecognizer {
    spec: CommandSpec,
}

impl CommandRecognizer {
    /// Recognizer for `spec`, or `None` when unset or its program cannot be found
    pub fn detect(spec: Option<&CommandSpec>) -> Option<Self> {
        let spec = spec?;

        if !program_available(&spec.program) {
            tracing::warn!(
                "Speech recognizer {} not found, voice input disabled",
                spec.program
            );
            return None;
        }

        Some(Self { spec: spec.clone() })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(
        &self,
        lang: &str,
        cancel: CancellationToken,
    ) -> anyhow::Result<Option<String>> {
        let args = expand_args(&self.spec, &[("lang", lang)]);

        let child = Command::new(&self.spec.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        tokio::select! {
            output = child.wait_with_output() => {
                let output = output?;
                if !output.status.success() {
                    anyhow::bail!("{} exited with {}", self.spec.program, output.status);
                }
                let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok((!transcript.is_empty()).then_some(transcript))
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Speech recognition cancelled");
                Ok(None)
            }
        }
    }
}
