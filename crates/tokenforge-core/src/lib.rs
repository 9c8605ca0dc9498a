//! Core types, chain selectors, and prompt parameter extraction.

pub mod chain;
pub mod error;
pub mod extract;
pub mod model;
pub mod units;

pub use chain::ChainId;
pub use error::CoreError;
pub use extract::{extract, sanitize_identifier};
pub use model::{
    Artifact, Component, Feedback, LogicBreakdown, ParameterRecord, Segment, Severity, Suggestion,
    TokenomicsSummary,
};
