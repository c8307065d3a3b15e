pub mod clipboard;
pub mod command;
pub mod flags;
pub mod share;
pub mod speech;
pub mod theme;

pub use clipboard::{ClipboardWriter, SystemClipboard, copy_text};
pub use flags::{FlagSource, HttpFlagSource};
pub use share::{ClipboardSharer, CommandSharer, ShareOutcome, Sharer};
pub use speech::{CommandRecognizer, CommandSynthesizer, SpeechRecognizer, SpeechSynthesizer};
pub use theme::{FileThemeStore, ThemeStore};
