/// Sheet and key name constants shared across the pipeline stages

// Required sheet names (case-sensitive)
pub const PN_SHEET: &str = "PN";
pub const GENERAL_SHEET: &str = "GENERAL";

/// Key holding the concatenated part number in every catalog entry
pub const PN_KEY: &str = "PN";

// Environment variables
pub const CONFIG_ENV: &str = "PN_CATALOG_CONFIG";
pub const LOG_ENV: &str = "PN_CATALOG_LOG";

/// File name prefix of the daily rolling log
pub const LOG_FILE: &str = "pn_catalog.log";

/// Extension of generated catalog files
pub const OUTPUT_EXTENSION: &str = "json";

/// Upper bound on up-front allocation for the entry vector; larger
/// catalogs still grow as needed.
pub const PREALLOC_LIMIT: usize = 1 << 16;
