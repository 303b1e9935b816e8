use std::fmt::Display;

#[derive(Hash, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Variable {
    Named(String),
    Inferred(usize),
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self::Named(value.to_owned())
    }
}

impl From<usize> for Variable {
    fn from(value: usize) -> Self {
        Self::Inferred(value)
    }
}

impl Variable {
    pub fn is_inferred(&self) -> bool {
        matches!(self, Self::Inferred(_))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(s) => s.fmt(f),
            Self::Inferred(n) => write!(f, "τ{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;

    #[test]
    fn display() {
        assert_eq!(Variable::from(3).to_string(), "τ3");
        assert_eq!(Variable::from("a").to_string(), "a");
        assert!(Variable::from(3).is_inferred());
        assert!(!Variable::from("a").is_inferred());
    }

    #[test]
    fn named_variables_order_before_inferred() {
        let mut vs = vec![Variable::from(1), Variable::from("b"), Variable::from(0)];
        vs.sort();
        assert_eq!(vs, [Variable::from("b"), Variable::from(0), Variable::from(1)]);
    }
}
