pub mod algorithm;
pub mod built_in;

mod engine;
mod unification;

pub use engine::InferenceEngine;
pub use unification::{Constraint, ConstraintKind};

use crate::model::typing::{Type, Variable};
use crate::model::AlreadyBound;
use thiserror::Error;

#[derive(Clone, Error, PartialEq, Eq, Debug)]
pub enum TypeError {
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),
    #[error("cannot unify {0} with {1}: {} and {} are different kinds of type", .0.kind(), .1.kind())]
    KindMismatch(Type, Type),
    #[error("expected type {0}, found {1}")]
    TypeMismatch(Type, Type),
    #[error("cannot construct infinite type {0} = {1}")]
    OccursCheckFailed(Variable, Type),
    #[error("cannot unify {left} with {right}: expected {expected} components, found {found}")]
    ArityMismatch {
        left: Type,
        right: Type,
        expected: usize,
        found: usize,
    },
    #[error("cannot unify arrays of different lengths: {0} and {1}")]
    ArrayLengthMismatch(Type, Type),
    #[error("field '{0}' is missing from {1}")]
    MissingField(String, Type),
    #[error("annotation {annotation} does not match inferred type {inferred}")]
    AnnotationMismatch {
        annotation: Type,
        inferred: Type,
        #[source]
        source: Box<TypeError>,
    },
    #[error(transparent)]
    AlreadyBound(#[from] AlreadyBound),
    #[error("unification exceeded the maximum depth of {0}")]
    DepthExceeded(usize),
    #[error("cannot leave the global scope")]
    ScopeUnderflow,
    #[error("{context}: {cause}")]
    Judgment { context: String, cause: Box<TypeError> },
}

pub type Result<T> = std::result::Result<T, TypeError>;

impl TypeError {
    pub fn in_judgment(self, context: impl Into<String>) -> Self {
        Self::Judgment {
            context: context.into(),
            cause: Box::new(self),
        }
    }

    /// The innermost error beneath any judgment or annotation wrappers.
    pub fn root_cause(&self) -> &TypeError {
        match self {
            Self::Judgment { cause, .. } => cause.root_cause(),
            Self::AnnotationMismatch { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}
