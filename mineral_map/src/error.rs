//! Error types for catalog validation and configuration parsing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("mine `{mine_id}` references unknown mineral `{mineral_id}`")]
    UnknownMineral {
        mine_id: &'static str,
        mineral_id: &'static str,
    },
    #[error("mine id `{mine_id}` appears more than once for mineral `{mineral_id}`")]
    DuplicateMine {
        mine_id: &'static str,
        mineral_id: &'static str,
    },
    #[error("mineral id `{0}` appears more than once")]
    DuplicateMineral(&'static str),
    #[error("mine `{mine_id}` has out-of-range position ({lat}, {lng})")]
    InvalidPosition {
        mine_id: &'static str,
        lat: f64,
        lng: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: {reason}")]
    OutOfRange { var: &'static str, reason: String },
    #[error("invalid tile URL template {template:?}: {source}")]
    InvalidTileTemplate {
        template: String,
        #[source]
        source: url::ParseError,
    },
}
