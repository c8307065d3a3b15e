pub mod catalog;
pub mod error;
pub mod flag;
pub mod preprocess;
pub mod render;
pub mod selection;
pub mod session;

pub use catalog::{LanguageCatalog, LanguageEntry};
pub use error::{CatalogError, SelectionError};
pub use render::render;
pub use selection::SelectionState;
pub use session::Session;
