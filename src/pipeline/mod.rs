// Conversion pipeline: ingestion, processing, and storage

pub mod generator;
pub mod ingestion;
pub mod processing;
pub mod storage;

// Re-export key types and functions from each stage
pub use generator::{convert, generate_catalog, Catalog, Generator, RunSummary};
pub use processing::{AttributeIndex, CatalogEntry, GeneralAttributes, PnFieldSet};
