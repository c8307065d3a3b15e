use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::CatalogError;

const BUILTIN: &[(&str, &str)] = &[
    ("af-ZA", "Afrikaans"),
    ("am-ET", "Amharic"),
    ("ar-SA", "Arabic"),
    ("az-AZ", "Azerbaijani"),
    ("be-BY", "Belarusian"),
    ("bg-BG", "Bulgarian"),
    ("bn-BD", "Bengali"),
    ("bs-BA", "Bosnian"),
    ("ca-ES", "Catalan"),
    ("cs-CZ", "Czech"),
    ("cy-GB", "Welsh"),
    ("da-DK", "Danish"),
    ("de-DE", "German"),
    ("el-GR", "Greek"),
    ("en-GB", "English (UK)"),
    ("en-US", "English (US)"),
    ("es-ES", "Spanish"),
    ("es-MX", "Spanish (Mexico)"),
    ("et-EE", "Estonian"),
    ("eu-ES", "Basque"),
    ("fa-IR", "Persian"),
    ("fi-FI", "Finnish"),
    ("fil-PH", "Filipino"),
    ("fr-FR", "French"),
    ("ga-IE", "Irish"),
    ("gl-ES", "Galician"),
    ("gu-IN", "Gujarati"),
    ("he-IL", "Hebrew"),
    ("hi-IN", "Hindi"),
    ("hr-HR", "Croatian"),
    ("ht-HT", "Haitian Creole"),
    ("hu-HU", "Hungarian"),
    ("hy-AM", "Armenian"),
    ("id-ID", "Indonesian"),
    ("is-IS", "Icelandic"),
    ("it-IT", "Italian"),
    ("ja-JP", "Japanese"),
    ("ka-GE", "Georgian"),
    ("kk-KZ", "Kazakh"),
    ("km-KH", "Khmer"),
    ("ko-KR", "Korean"),
    ("ky-KG", "Kyrgyz"),
    ("lo-LA", "Lao"),
    ("lt-LT", "Lithuanian"),
    ("lv-LV", "Latvian"),
    ("mg-MG", "Malagasy"),
    ("mk-MK", "Macedonian"),
    ("mn-MN", "Mongolian"),
    ("ms-MY", "Malay"),
    ("mt-MT", "Maltese"),
    ("my-MM", "Burmese"),
    ("ne-NP", "Nepali"),
    ("nl-NL", "Dutch"),
    ("no-NO", "Norwegian"),
    ("pl-PL", "Polish"),
    ("ps-AF", "Pashto"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese"),
    ("ro-RO", "Romanian"),
    ("ru-RU", "Russian"),
    ("si-LK", "Sinhala"),
    ("sk-SK", "Slovak"),
    ("sl-SI", "Slovenian"),
    ("so-SO", "Somali"),
    ("sq-AL", "Albanian"),
    ("sr-RS", "Serbian"),
    ("sv-SE", "Swedish"),
    ("sw-KE", "Swahili"),
    ("ta-LK", "Tamil"),
    ("tg-TJ", "Tajik"),
    ("th-TH", "Thai"),
    ("tk-TM", "Turkmen"),
    ("tr-TR", "Turkish"),
    ("uk-UA", "Ukrainian"),
    ("ur-PK", "Urdu"),
    ("uz-UZ", "Uzbek"),
    ("vi-VN", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
}

/// Fixed, ordered code -> display name table. Never mutated once built.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<LanguageEntry>,
    index: HashMap<String, usize>,
}

impl LanguageCatalog {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(code, name)| LanguageEntry {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect();

        Self::from_entries(entries)
    }

    /// Build from `(code, name)` pairs, keeping their order
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: Vec<LanguageEntry> = Vec::new();

        for (code, name) in pairs {
            let code = code.trim().to_string();
            let name = name.trim().to_string();
            if code.is_empty() || name.is_empty() {
                return Err(CatalogError::InvalidEntry(code));
            }
            if entries.iter().any(|e| e.code == code) {
                return Err(CatalogError::InvalidEntry(code));
            }
            entries.push(LanguageEntry { code, name });
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self::from_entries(entries))
    }

    /// JSON object of `"code": "name"`. Entries come out ordered by code.
    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let map: BTreeMap<String, String> = serde_json::from_str(data)?;
        Self::from_pairs(map)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    fn from_entries(entries: Vec<LanguageEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Fails unless every code is present
    pub fn require(&self, codes: &[&str]) -> Result<(), CatalogError> {
        match codes.iter().find(|code| !self.contains(code)) {
            Some(missing) => Err(CatalogError::MissingDefault(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.index
            .get(code)
            .map(|&i| self.entries[i].name.as_str())
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn get(&self, index: usize) -> Option<&LanguageEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose display name contains `query`, ignoring case. A blank query matches all.
    pub fn filter(&self, query: &str) -> Vec<&LanguageEntry> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
