//! Heuristic assistance around synthesis: feedback on capability
//! instructions and plain-language explanations of generated source.

pub mod advisor;
pub mod explain;

pub use advisor::{RuleId, advise, classify};
pub use explain::{Explainer, explain};
