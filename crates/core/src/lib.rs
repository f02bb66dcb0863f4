pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use config::AppConfig;
pub use error::{LensError, LensResult};
pub use loader::{load_document, LoadedData, SkippedRecord};
pub use types::{Campaign, MarketingData, Performance};
