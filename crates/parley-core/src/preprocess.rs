use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Trimmed, NFC-normalized text, or `None` when nothing is left to send
    fn process(&self, text: &str) -> Option<String> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        Some(text.nfc().collect())
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
