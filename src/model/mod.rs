pub mod term;
pub mod typing;

mod environment;
mod free_variable;
mod substitution;

pub use environment::TypeEnvironment;
pub use free_variable::FreeVariable;
pub use substitution::{AlreadyBound, Substitute, Substitution, DEFAULT_DEPTH_LIMIT};
