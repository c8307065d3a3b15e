/// Flag shown for codes without a region segment, and when a flag image fails to load
pub const DEFAULT_FLAG_KEY: &str = "us";

pub const FLAG_CDN: &str = "https://flagcdn.com/w40";

/// Flag key for a language code: the lowercased region segment, `us` when there is none.
///
/// `"en-GB"` -> `"gb"`, `"es-ES"` -> `"es"`, `"eo"` -> `"us"`.
pub fn flag_key(code: &str) -> String {
    code.split('-')
        .nth(1)
        .filter(|region| !region.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_FLAG_KEY.to_string())
}

pub fn flag_url(key: &str) -> String {
    format!("{FLAG_CDN}/{key}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_segment_is_lowercased() {
        assert_eq!(flag_key("en-GB"), "gb");
        assert_eq!(flag_key("pt-BR"), "br");
        assert_eq!(flag_key("zh-Hant-TW"), "hant");
    }

    #[test]
    fn missing_region_falls_back() {
        assert_eq!(flag_key("eo"), DEFAULT_FLAG_KEY);
        assert_eq!(flag_key("la-"), DEFAULT_FLAG_KEY);
        assert_eq!(flag_key(""), DEFAULT_FLAG_KEY);
    }

    #[test]
    fn derivation_is_idempotent() {
        let key = flag_key("sv-SE");
        assert_eq!(flag_key("sv-SE"), key);
        assert_eq!(flag_url(&key), "https://flagcdn.com/w40/se.png");
    }
}
