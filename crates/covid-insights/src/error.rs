//! Custom error types for the snapshot analysis.
//!
//! This module provides the error hierarchy using `thiserror` so every stage
//! of the analysis can report failures with context.
//!
//! Errors are serializable so they can be emitted alongside the JSON summary.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// One or more mandatory logical fields could not be matched to a header.
    #[error(
        "Missing required columns: {}. Detected -> country: {country:?}, confirmed: {confirmed:?}, deaths: {deaths:?}. Available columns: {available:?}",
        missing_field_names(.country, .confirmed, .deaths).join(", ")
    )]
    MissingRequiredColumns {
        country: Option<String>,
        confirmed: Option<String>,
        deaths: Option<String>,
        /// Headers present in the input file.
        available: Vec<String>,
    },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chart could not be drawn or saved.
    #[error("Failed to render chart '{title}': {reason}")]
    ChartRendering { title: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightsError>,
    },
}

/// Names of the mandatory fields that did not resolve, in field order.
fn missing_field_names(
    country: &Option<String>,
    confirmed: &Option<String>,
    deaths: &Option<String>,
) -> Vec<&'static str> {
    [("country", country), ("confirmed", confirmed), ("deaths", deaths)]
        .into_iter()
        .filter(|(_, resolved)| resolved.is_none())
        .map(|(name, _)| name)
        .collect()
}

impl InsightsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredColumns { .. } => "MISSING_REQUIRED_COLUMNS",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ChartRendering { .. } => "CHART_RENDERING_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Names of the mandatory fields this error reports as missing.
    ///
    /// Empty for every variant other than `MissingRequiredColumns`.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingRequiredColumns {
                country,
                confirmed,
                deaths,
                ..
            } => missing_field_names(country, confirmed, deaths),
            Self::WithContext { source, .. } => source.missing_fields(),
            _ => Vec::new(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightsError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightsError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_confirmed() -> InsightsError {
        InsightsError::MissingRequiredColumns {
            country: Some("Country/Region".to_string()),
            confirmed: None,
            deaths: Some("Deaths".to_string()),
            available: vec!["Country/Region".to_string(), "Deaths".to_string()],
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(missing_confirmed().error_code(), "MISSING_REQUIRED_COLUMNS");
        assert_eq!(
            InsightsError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_missing_columns_message_names_missing_fields() {
        let message = missing_confirmed().to_string();
        assert!(message.starts_with("Missing required columns: confirmed."));
        assert!(message.contains("country: Some(\"Country/Region\")"));
        assert!(message.contains("confirmed: None"));
        assert!(message.ends_with("Available columns: [\"Country/Region\", \"Deaths\"]"));
    }

    #[test]
    fn test_missing_columns_lists_every_absent_field() {
        let error = InsightsError::MissingRequiredColumns {
            country: None,
            confirmed: None,
            deaths: None,
            available: Vec::new(),
        };
        assert_eq!(error.missing_fields(), vec!["country", "confirmed", "deaths"]);
        assert!(error.to_string().contains("country, confirmed, deaths"));
    }

    #[test]
    fn test_error_serialization() {
        let error = InsightsError::ColumnNotFound("Deaths".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Deaths"));
    }

    #[test]
    fn test_with_context() {
        let error = missing_confirmed().with_context("While resolving columns");
        assert!(error.to_string().contains("While resolving columns"));
        assert_eq!(error.error_code(), "MISSING_REQUIRED_COLUMNS");
        assert_eq!(error.missing_fields(), vec!["confirmed"]);
    }
}
