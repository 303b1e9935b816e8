use super::typing::TypeScheme;
use std::collections::{hash_map, HashMap};
use std::fmt::Display;
use std::ops::{Add, AddAssign};

#[derive(Default, PartialEq, Eq, Clone, Debug)]
pub struct TypeEnvironment {
    variables: HashMap<String, TypeScheme>,
    parent: Option<Box<TypeEnvironment>>,
    level: usize,
}

impl FromIterator<(String, TypeScheme)> for TypeEnvironment {
    fn from_iter<I: IntoIterator<Item = (String, TypeScheme)>>(iter: I) -> Self {
        Self {
            variables: HashMap::from_iter(iter),
            parent: None,
            level: 0,
        }
    }
}

impl Extend<(String, TypeScheme)> for TypeEnvironment {
    fn extend<I: IntoIterator<Item = (String, TypeScheme)>>(&mut self, iter: I) {
        self.variables.extend(iter)
    }
}

impl<U: Into<TypeScheme>> AddAssign<(String, U)> for TypeEnvironment {
    fn add_assign(&mut self, (name, x): (String, U)) {
        self.variables.insert(name, x.into());
    }
}

impl<U: Into<TypeScheme>> Add<(String, U)> for TypeEnvironment {
    type Output = Self;

    fn add(mut self, rhs: (String, U)) -> Self::Output {
        self += rhs;
        self
    }
}

impl Display for TypeEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bindings = (self.iter())
            .map(|(n, p)| format!("{n}: {p}"))
            .collect::<Vec<_>>();
        bindings.sort();
        write!(f, "[{}]", bindings.join(", "))?;
        if let Some(parent) = &self.parent {
            write!(f, " ⊂ {parent}")?;
        }
        Ok(())
    }
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn parent(&self) -> Option<&TypeEnvironment> {
        self.parent.as_deref()
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    pub fn define(&mut self, name: impl Into<String>, scheme: impl Into<TypeScheme>) {
        self.variables.insert(name.into(), scheme.into());
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&TypeScheme> {
        (self.variables.get(name)).or_else(|| self.parent.as_ref()?.lookup_variable(name))
    }

    pub fn get(&self, name: &str) -> Option<&TypeScheme> {
        self.variables.get(name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.lookup_variable(name).is_some()
    }

    pub fn push(self) -> Self {
        let level = self.level + 1;
        Self {
            variables: HashMap::new(),
            parent: Some(Box::new(self)),
            level,
        }
    }

    pub fn pop(self) -> Option<Self> {
        self.parent.map(|parent| *parent)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, TypeScheme> {
        self.variables.iter()
    }

    pub fn names(&self) -> hash_map::Keys<'_, String, TypeScheme> {
        self.variables.keys()
    }

    /// Every scheme visible from this scope, innermost scope first. Shadowed
    /// bindings are included.
    pub fn schemes(&self) -> Box<dyn Iterator<Item = &TypeScheme> + '_> {
        let outer = self.parent.iter().flat_map(|p| p.schemes());
        Box::new(self.variables.values().chain(outer))
    }
}
