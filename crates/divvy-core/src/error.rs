//! Error types for Divvy

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Total price is not present for item '{item}'")]
    MissingTotal { item: String },

    #[error("Item '{item}' total {stated} does not match calculated total {computed}")]
    TotalMismatch {
        item: String,
        stated: f64,
        computed: f64,
    },

    #[error("Different number of items in bill ({items}) and item split ({splits})")]
    ItemCountMismatch { items: usize, splits: usize },

    #[error("Item '{item}' is missing from the item split")]
    UnknownItem { item: String },

    #[error("Shares for item '{item}' sum to {sum}, expected within [{min}, {max}]")]
    ShareSumOutOfRange {
        item: String,
        sum: f64,
        min: f64,
        max: f64,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Stable identifier for the error kind (used in API responses)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput(_) => "empty_input",
            Self::MissingTotal { .. } => "missing_total",
            Self::TotalMismatch { .. } => "total_mismatch",
            Self::ItemCountMismatch { .. } => "item_count_mismatch",
            Self::UnknownItem { .. } => "unknown_item",
            Self::ShareSumOutOfRange { .. } => "share_sum_out_of_range",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::InvalidData(_) => "invalid_data",
            Self::Backend(_) => "backend",
        }
    }

    /// Whether this error describes bad bill data rather than an I/O or
    /// infrastructure failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput(_)
                | Self::MissingTotal { .. }
                | Self::TotalMismatch { .. }
                | Self::ItemCountMismatch { .. }
                | Self::UnknownItem { .. }
                | Self::ShareSumOutOfRange { .. }
                | Self::InvalidData(_)
                | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_snake_case() {
        let err = Error::ShareSumOutOfRange {
            item: "Chair".into(),
            sum: 0.95,
            min: 0.99,
            max: 1.01,
        };
        assert_eq!(err.kind(), "share_sum_out_of_range");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_is_not_validation() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), "io");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_display_names_item() {
        let err = Error::MissingTotal {
            item: "Bed".into(),
        };
        assert_eq!(err.to_string(), "Total price is not present for item 'Bed'");
    }
}
