use super::{Type, Variable};
use std::{collections::HashMap, fmt::Display};

/// `∀ quantifiers. ty`. An empty quantifier list makes the scheme monomorphic.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TypeScheme {
    pub quantifiers: Vec<Variable>,
    pub ty: Type,
    pub level: usize,
}

impl From<Type> for TypeScheme {
    fn from(value: Type) -> Self {
        Self::monomorphic(value)
    }
}

impl Display for TypeScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in &self.quantifiers {
            write!(f, "∀{v}. ")?;
        }
        write!(f, "{}", self.ty)
    }
}

impl TypeScheme {
    pub fn new(ty: impl Into<Type>, quantifiers: impl IntoIterator<Item: Into<Variable>>) -> Self {
        Self {
            quantifiers: quantifiers.into_iter().map(Into::into).collect(),
            ty: ty.into(),
            level: 0,
        }
    }

    pub fn monomorphic(ty: impl Into<Type>) -> Self {
        Self {
            quantifiers: Vec::new(),
            ty: ty.into(),
            level: 0,
        }
    }

    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn is_monomorphic(&self) -> bool {
        self.quantifiers.is_empty()
    }

    /// Replaces every quantified variable with a fresh inferred variable numbered from
    /// `next_fresh`, returning the instance and the next unused number.
    pub fn instantiate(&self, next_fresh: usize) -> (Type, usize) {
        if self.is_monomorphic() {
            return (self.ty.clone(), next_fresh);
        }
        let n = next_fresh + self.quantifiers.len();
        let mappings = (self.quantifiers.iter())
            .zip((next_fresh..).map(Variable::Inferred))
            .collect::<HashMap<_, _>>();
        let mut ty = self.ty.clone();
        ty.vars_mut().for_each(|v1| {
            if let Some(v2) = mappings.get(v1) {
                *v1 = v2.to_owned();
            }
        });
        (ty, n)
    }
}
