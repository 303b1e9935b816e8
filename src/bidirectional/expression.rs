use crate::model::term::{BinaryOp, Literal};
use crate::model::typing::Type;
use std::fmt::Display;

#[derive(PartialEq, Clone, Debug)]
pub enum Expr {
    Lit(Literal),
    Var(String),
    App(Box<Expr>, Box<Expr>),
    /// Unannotated lambda; only checkable against a function type.
    Lambda(String, Box<Expr>),
    Annotated(Box<Expr>, Type),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn lit(lit: impl Into<Literal>) -> Self {
        Self::Lit(lit.into())
    }

    pub fn var(x: impl AsRef<str>) -> Self {
        Self::Var(x.as_ref().to_owned())
    }

    pub fn app(e1: Expr, e2: Expr) -> Self {
        Self::App(Box::new(e1), Box::new(e2))
    }

    pub fn lambda(x: impl AsRef<str>, e: Expr) -> Self {
        Self::Lambda(x.as_ref().to_owned(), Box::new(e))
    }

    pub fn annotated(e: Expr, m: Type) -> Self {
        Self::Annotated(Box::new(e), m)
    }

    pub fn if_else(e1: Expr, e2: Expr, e3: Expr) -> Self {
        Self::If(Box::new(e1), Box::new(e2), Box::new(e3))
    }

    pub fn binary(op: BinaryOp, e1: Expr, e2: Expr) -> Self {
        Self::Binary(op, Box::new(e1), Box::new(e2))
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Self::Lit(_) | Self::Var(_) | Self::Annotated(..))
    }
}

struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_atomic() {
            self.0.fmt(f)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lit(lit) => lit.fmt(f),
            Self::Var(x) => x.fmt(f),
            Self::App(e1, e2) => match e1.as_ref() {
                Self::App(..) => write!(f, "{e1} {}", Operand(e2)),
                _ => write!(f, "{} {}", Operand(e1), Operand(e2)),
            },
            Self::Lambda(x, e) => write!(f, "λ{x} → {e}"),
            Self::Annotated(e, m) => write!(f, "({e} : {m})"),
            Self::If(e1, e2, e3) => write!(f, "if {e1} then {e2} else {e3}"),
            Self::Binary(op, e1, e2) => write!(f, "{} {op} {}", Operand(e1), Operand(e2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = Expr::annotated(Expr::lambda("x", Expr::var("x")), Type::function(Type::Int32, Type::Int32));
        assert_eq!(e.to_string(), "(λx → x : (Int32) → Int32)");
        let e = Expr::app(Expr::var("f"), Expr::binary(BinaryOp::Mul, Expr::lit(2), Expr::lit(3)));
        assert_eq!(e.to_string(), "f (2 * 3)");
    }
}
