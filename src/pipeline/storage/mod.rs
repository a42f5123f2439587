// Pipeline storage: catalog serialization and output file naming

pub mod json;

pub use json::{default_output_path, to_ascii_json, write_catalog, AsciiFormatter};
