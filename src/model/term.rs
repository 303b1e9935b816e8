use super::typing::Type;
use std::fmt::Display;

#[derive(PartialEq, Clone, Debug)]
pub enum Literal {
    Bool(bool),
    Int(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Binding {
    Var(String),
    Discard,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(PartialEq, Clone, Debug)]
pub enum Term {
    /// A literal, with an optional annotation overriding the type of its value.
    Lit(Literal, Option<Type>),
    Var(String),
    App(Box<Term>, Box<Term>),
    Abs(Binding, Option<Type>, Box<Term>),
    Let(Binding, Option<Type>, Box<Term>, Box<Term>),
    Fix(String, Binding, Box<Term>),
    If(Box<Term>, Box<Term>, Box<Term>),
    BinOp(BinaryOp, Box<Term>, Box<Term>),
    UnOp(UnaryOp, Box<Term>),
    Tuple(Vec<Term>),
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Self::Var(value)
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Self::Var(value.to_owned())
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Self::Lit(value, None)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl Literal {
    pub fn default_type(&self) -> Type {
        match self {
            Literal::Bool(_) => Type::Bool,
            Literal::Int(_) => Type::Int32,
            Literal::Int64(_) => Type::Int64,
            Literal::Float32(_) => Type::Float32,
            Literal::Float64(_) => Type::Float64,
            Literal::String(_) => Type::String,
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Not => "!",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl Term {
    pub fn lit(lit: impl Into<Literal>) -> Self {
        Self::Lit(lit.into(), None)
    }

    pub fn var(x: impl AsRef<str>) -> Self {
        Self::Var(x.as_ref().to_owned())
    }

    pub fn app(t1: Term, t2: Term) -> Self {
        Self::App(Box::new(t1), Box::new(t2))
    }

    pub fn abs(b: impl Into<Binding>, t: Term) -> Self {
        Self::Abs(b.into(), None, Box::new(t))
    }

    pub fn abs_annotated(b: impl Into<Binding>, m: Type, t: Term) -> Self {
        Self::Abs(b.into(), Some(m), Box::new(t))
    }

    pub fn let_in(b: impl Into<Binding>, t1: Term, t2: Term) -> Self {
        Self::Let(b.into(), None, Box::new(t1), Box::new(t2))
    }

    pub fn fix(f: impl AsRef<str>, b: impl Into<Binding>, t: Term) -> Self {
        Self::Fix(f.as_ref().to_owned(), b.into(), Box::new(t))
    }

    pub fn if_else(t1: Term, t2: Term, t3: Term) -> Self {
        Self::If(Box::new(t1), Box::new(t2), Box::new(t3))
    }

    pub fn binary(op: BinaryOp, t1: Term, t2: Term) -> Self {
        Self::BinOp(op, Box::new(t1), Box::new(t2))
    }

    pub fn unary(op: UnaryOp, t: Term) -> Self {
        Self::UnOp(op, Box::new(t))
    }

    pub fn tuple(ts: impl IntoIterator<Item = Term>) -> Self {
        Self::Tuple(ts.into_iter().collect())
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Self::Lit(..) | Self::Var(_) | Self::Tuple(_))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Bool(b) => b.fmt(f),
            Literal::Int(n) => n.fmt(f),
            Literal::Int64(n) => write!(f, "{n}L"),
            Literal::Float32(x) => write!(f, "{x}f"),
            Literal::Float64(x) => x.fmt(f),
            Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Var(v) => v.fmt(f),
            Binding::Discard => "_".fmt(f),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbol().fmt(f)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbol().fmt(f)
    }
}

struct Operand<'a>(&'a Term);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_atomic() {
            self.0.fmt(f)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Term::*;
        match self {
            Lit(lit, None) => lit.fmt(f),
            Lit(lit, Some(m)) => write!(f, "({lit} : {m})"),
            Var(x) => x.fmt(f),
            App(t1, t2) => match t1.as_ref() {
                App(..) => write!(f, "{t1} {}", Operand(t2)),
                _ => write!(f, "{} {}", Operand(t1), Operand(t2)),
            },
            Abs(x, None, t) => write!(f, "λ{x} → {t}"),
            Abs(x, Some(m), t) => write!(f, "λ({x} : {m}) → {t}"),
            Let(x, None, t1, t2) => write!(f, "let {x} = {t1} in {t2}"),
            Let(x, Some(m), t1, t2) => write!(f, "let {x} : {m} = {t1} in {t2}"),
            Fix(fun, x, t) => write!(f, "fix {fun} λ{x} → {t}"),
            If(t1, t2, t3) => write!(f, "if {t1} then {t2} else {t3}"),
            BinOp(op, t1, t2) => write!(f, "{} {op} {}", Operand(t1), Operand(t2)),
            UnOp(op, t) => write!(f, "{op}{}", Operand(t)),
            Tuple(ts) => {
                let ts = ts.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "({})", ts.join(", "))
            }
        }
    }
}
