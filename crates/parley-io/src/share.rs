use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use parley_config::speech::CommandSpec;
use tokio::process::Command;

use crate::clipboard::{ClipboardWriter, copy_text};
use crate::command::expand_args;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to a native share target
    Shared,
    /// No share target, the text went to the clipboard instead
    Copied,
}

#[async_trait]
pub trait Sharer: Send + Sync {
    async fn share(&self, title: &str, text: &str) -> anyhow::Result<ShareOutcome>;
}

/// Runs a configured program with `{title}` and `{text}` substituted and
/// waits for it to exit
pub struct CommandSharer {
    spec: CommandSpec,
}

impl CommandSharer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl Sharer for CommandSharer {
    async fn share(&self, title: &str, text: &str) -> anyhow::Result<ShareOutcome> {
        let args = expand_args(&self.spec, &[("title", title), ("text", text)]);

        let status = Command::new(&self.spec.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", self.spec.program, status);
        }

        tracing::debug!("Share handed to {}", self.spec.program);
        Ok(ShareOutcome::Shared)
    }
}

pub struct ClipboardSharer {
    clipboard: Arc<dyn ClipboardWriter>,
}

impl ClipboardSharer {
    pub fn new(clipboard: Arc<dyn ClipboardWriter>) -> Self {
        Self { clipboard }
    }
}

#[async_trait]
impl Sharer for ClipboardSharer {
    async fn share(&self, _title: &str, text: &str) -> anyhow::Result<ShareOutcome> {
        copy_text(self.clipboard.clone(), text.to_string()).await?;
        Ok(ShareOutcome::Copied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Mutex<Vec<String>>,
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&self, text: &str) -> anyhow::Result<()> {
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn fallback_copies_the_text() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let sharer = ClipboardSharer::new(clipboard.clone());

        let outcome = sharer.share("Translation", "hola").await.unwrap();
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(*clipboard.writes.lock().unwrap(), vec!["hola".to_string()]);
    }

    #[tokio::test]
    async fn missing_share_program_is_an_error() {
        let sharer = CommandSharer::new(CommandSpec::new(
            "parley-no-such-share-tool",
            &["{title}", "{text}"],
        ));
        assert!(sharer.share("Translation", "hola").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn share_waits_for_the_program_and_reports_its_exit() {
        let ok = CommandSharer::new(CommandSpec::new("sh", &["-c", "exit 0", "{title}", "{text}"]));
        assert_eq!(
            ok.share("Translation", "hola").await.unwrap(),
            ShareOutcome::Shared
        );

        let failing = CommandSharer::new(CommandSpec::new("sh", &["-c", "exit 3"]));
        let err = failing.share("Translation", "hola").await.unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
