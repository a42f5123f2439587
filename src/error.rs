use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{path} doesn't have required sheet '{sheet}'")]
    MissingRequiredSheet { sheet: String, path: String },

    #[error("Sheet '{sheet}' is malformed: {reason}")]
    MalformedSheet { sheet: String, reason: String },

    #[error("No attribute sheet found for PN field '{field}'")]
    MissingAttributeSheet { field: String },

    #[error("Value '{value}' of PN field '{field}' has no record in its attribute sheet")]
    LookupMiss { field: String, value: String },

    #[error("Combination count of {fields} PN fields does not fit in memory")]
    CombinationOverflow { fields: usize },

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub(crate) fn malformed(sheet: &str, reason: impl Into<String>) -> Self {
        CatalogError::MalformedSheet {
            sheet: sheet.to_string(),
            reason: reason.into(),
        }
    }

    /// Short, stable label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::MissingRequiredSheet { .. } => "missing_required_sheet",
            CatalogError::MalformedSheet { .. } => "malformed_sheet",
            CatalogError::MissingAttributeSheet { .. } => "missing_attribute_sheet",
            CatalogError::LookupMiss { .. } => "lookup_miss",
            CatalogError::CombinationOverflow { .. } => "combination_overflow",
            CatalogError::Workbook(_) => "workbook",
            CatalogError::Json(_) => "json",
            CatalogError::Toml(_) => "toml",
            CatalogError::Io(_) => "io",
            CatalogError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
