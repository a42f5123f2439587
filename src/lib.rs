pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{CatalogError, Result};
pub use pipeline::{convert, generate_catalog, Catalog, Generator, RunSummary};
pub use types::{CellValue, Sheet, Workbook};
