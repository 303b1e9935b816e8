pub mod bidirectional;
pub mod config;
pub mod model;
pub mod type_inference;

pub use bidirectional::{BidirectionalChecker, BidirectionalError, Expr, Mode};
pub use config::InferenceConfig;
pub use type_inference::{Constraint, ConstraintKind, InferenceEngine, TypeError};
