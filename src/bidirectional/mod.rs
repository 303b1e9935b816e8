mod checker;
mod expression;

pub use checker::{BidirectionalChecker, Mode};
pub use expression::Expr;

use crate::model::typing::Type;
use crate::type_inference::TypeError;
use thiserror::Error;

#[derive(Clone, Error, PartialEq, Eq, Debug)]
#[error("{context}: {message}{} in `{location}`", describe(.expected, .actual))]
pub struct BidirectionalError {
    pub expected: Option<Type>,
    pub actual: Option<Type>,
    pub message: String,
    pub context: String,
    pub location: String,
    #[source]
    pub source: Option<TypeError>,
}

fn describe(expected: &Option<Type>, actual: &Option<Type>) -> String {
    match (expected, actual) {
        (Some(e), Some(a)) => format!(" (expected {e}, found {a})"),
        (Some(e), None) => format!(" (expected {e})"),
        (None, Some(a)) => format!(" (found {a})"),
        (None, None) => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BidirectionalError>;

impl BidirectionalError {
    pub fn new(context: impl Into<String>, message: impl Into<String>, expr: &Expr) -> Self {
        Self {
            expected: None,
            actual: None,
            message: message.into(),
            context: context.into(),
            location: expr.to_string(),
            source: None,
        }
    }

    pub fn expected(mut self, m: Type) -> Self {
        self.expected = Some(m);
        self
    }

    pub fn actual(mut self, m: Type) -> Self {
        self.actual = Some(m);
        self
    }

    pub fn caused_by(mut self, e: TypeError) -> Self {
        self.source = Some(e);
        self
    }
}
