use std::path::Path;
use std::sync::Arc;

use parley_config::Config;
use parley_core::LanguageCatalog;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub catalog: Arc<LanguageCatalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: LanguageCatalog) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: Arc::new(catalog),
        }
    }
}

/// Catalog from `catalog.path` when it loads and holds both default
/// languages, the built-in list otherwise
pub fn load_catalog(config: &Config) -> LanguageCatalog {
    let defaults = [
        config.ui.default_source.as_str(),
        config.ui.default_target.as_str(),
    ];

    if let Some(path) = &config.catalog.path {
        let loaded = LanguageCatalog::from_json_file(Path::new(path))
            .and_then(|catalog| catalog.require(&defaults).map(|_| catalog));

        match loaded {
            Ok(catalog) => {
                tracing::info!("Loaded {} languages from {path}", catalog.len());
                return catalog;
            }
            Err(e) => tracing::warn!("Falling back to built-in catalog: {e}"),
        }
    }

    LanguageCatalog::builtin()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn catalog_file(contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("parley-catalog-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    #[test]
    fn no_path_uses_builtin() {
        let catalog = load_catalog(&Config::default());
        assert_eq!(catalog.len(), LanguageCatalog::builtin().len());
    }

    #[test]
    fn custom_catalog_with_defaults_is_used() {
        let mut config = Config::default();
        config.catalog.path = Some(catalog_file(
            r#"{"en-GB": "English", "es-ES": "Spanish", "fr-FR": "French"}"#,
        ));

        let catalog = load_catalog(&config);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.display_name("en-GB"), Some("English"));
    }

    #[test]
    fn custom_catalog_missing_a_default_falls_back() {
        let mut config = Config::default();
        config.catalog.path = Some(catalog_file(r#"{"fr-FR": "French"}"#));

        let catalog = load_catalog(&config);
        assert_eq!(catalog.len(), LanguageCatalog::builtin().len());
    }
}
