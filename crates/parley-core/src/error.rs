#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog is empty")]
    Empty,

    #[error("Invalid catalog entry: {0:?}")]
    InvalidEntry(String),

    #[error("Catalog is missing default language {0}")]
    MissingDefault(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
