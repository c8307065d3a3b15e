use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON object of code -> display name replacing the built-in list
    pub path: Option<String>,
}
