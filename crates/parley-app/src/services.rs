use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parley_config::Config;
use parley_io::{
    ClipboardSharer, ClipboardWriter, CommandRecognizer, CommandSharer, CommandSynthesizer,
    FileThemeStore, FlagSource, HttpFlagSource, Sharer, SpeechRecognizer, SpeechSynthesizer,
    SystemClipboard, ThemeStore,
};
use parley_translator::{MyMemoryTranslator, Translator};

/// Collaborators the event loop talks to. Everything behind a trait so
/// tests can swap in fakes.
#[derive(Clone)]
pub struct Services {
    /// `None` when translation is disabled in config
    pub translator: Option<Arc<dyn Translator>>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    /// `None` when voice input is unsupported on this machine
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub clipboard: Arc<dyn ClipboardWriter>,
    pub sharer: Arc<dyn Sharer>,
    pub theme_store: Option<Arc<dyn ThemeStore>>,
    pub flags: Arc<dyn FlagSource>,
}

impl Services {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let translator: Option<Arc<dyn Translator>> = if !config.translator.enabled {
            tracing::warn!("Translator disabled in config");
            None
        } else {
            match config.translator.provider.as_str() {
                "mymemory" => {
                    let translator = MyMemoryTranslator::new(
                        config.translator.api_url.clone(),
                        config.translator.email.clone(),
                        Duration::from_secs(config.translator.timeout_seconds),
                    )?;
                    tracing::info!("Translator: {}", translator.metadata().name);
                    Some(Arc::new(translator))
                }
                other => {
                    tracing::warn!("Unknown translation provider {other}, translation disabled");
                    None
                }
            }
        };

        let synthesizer = config
            .speech
            .synthesizer
            .clone()
            .map(|spec| Arc::new(CommandSynthesizer::new(spec)) as Arc<dyn SpeechSynthesizer>);

        let recognizer = CommandRecognizer::detect(config.speech.recognizer.as_ref())
            .map(|r| Arc::new(r) as Arc<dyn SpeechRecognizer>);

        let clipboard: Arc<dyn ClipboardWriter> = Arc::new(SystemClipboard);

        let sharer: Arc<dyn Sharer> = match &config.share_command {
            Some(spec) => Arc::new(CommandSharer::new(spec.clone())),
            None => Arc::new(ClipboardSharer::new(clipboard.clone())),
        };

        let theme_store = config
            .ui
            .theme_path
            .as_ref()
            .map(PathBuf::from)
            .or_else(FileThemeStore::default_path)
            .map(|path| {
                tracing::debug!("Theme file: {}", path.display());
                Arc::new(FileThemeStore::new(path)) as Arc<dyn ThemeStore>
            });

        Ok(Self {
            translator,
            synthesizer,
            recognizer,
            clipboard,
            sharer,
            theme_store,
            flags: Arc::new(HttpFlagSource::new()?),
        })
    }
}
