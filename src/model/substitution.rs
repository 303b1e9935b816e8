use super::typing::{Type, TypeScheme, Variable};
use std::collections::{hash_map, HashMap};
use std::fmt::Display;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_DEPTH_LIMIT: usize = 512;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Substitution {
    map: HashMap<Variable, Type>,
    depth_limit: usize,
}

#[derive(Clone, Error, PartialEq, Eq, Debug)]
#[error("type variable '{0}' is already bound to {1}")]
pub struct AlreadyBound(pub Variable, pub Type);

pub trait Substitute {
    fn substitute_mut(&mut self, subst: &Substitution);

    fn substitute(mut self, subst: &Substitution) -> Self
    where
        Self: Sized,
    {
        self.substitute_mut(subst);
        self
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for Substitution {
    type Item = (Variable, Type);
    type IntoIter = hash_map::IntoIter<Variable, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl FromIterator<(Variable, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, Type)>>(iter: I) -> Self {
        Self {
            map: HashMap::from_iter(iter),
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut mappings = (self.iter())
            .map(|(v, t)| format!("{v} -> {t}"))
            .collect::<Vec<_>>();
        mappings.sort();
        write!(f, "{{{}}}", mappings.join(", "))
    }
}

impl Substitution {
    pub fn new() -> Self {
        Self::with_depth_limit(DEFAULT_DEPTH_LIMIT)
    }

    pub fn with_depth_limit(depth_limit: usize) -> Self {
        Self {
            map: HashMap::new(),
            depth_limit: depth_limit.max(1),
        }
    }

    pub fn get(&self, v: &Variable) -> Option<&Type> {
        self.map.get(v)
    }

    pub fn contains(&self, v: &Variable) -> bool {
        self.map.contains_key(v)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Variable, Type> {
        self.map.iter()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn bind(&mut self, v: Variable, t: Type) -> Result<(), AlreadyBound> {
        match self.map.entry(v) {
            hash_map::Entry::Occupied(e) => Err(AlreadyBound(e.key().clone(), e.get().clone())),
            hash_map::Entry::Vacant(e) => {
                e.insert(t);
                Ok(())
            }
        }
    }

    /// Only following a binding is charged against `budget`. A variable met again
    /// inside its own expansion is left in place.
    fn resolve_mut(&self, t: &mut Type, keep: &[Variable], path: &mut Vec<Variable>, budget: usize) -> bool {
        if let Type::Var(v) = &*t {
            let Some(bound) = self.map.get(v).filter(|_| !keep.contains(v)) else {
                return true;
            };
            if budget == 0 || path.contains(v) {
                return false;
            }
            path.push(v.clone());
            *t = bound.clone();
            let complete = self.resolve_mut(t, keep, path, budget - 1);
            path.pop();
            return complete;
        }
        let mut complete = true;
        for child in t.children_mut() {
            complete &= self.resolve_mut(child, keep, path, budget);
        }
        complete
    }

    fn resolve_except(&self, t: &mut Type, keep: &[Variable]) {
        if !self.resolve_mut(t, keep, &mut Vec::new(), self.depth_limit) {
            warn!(limit = self.depth_limit, "substitution left partially resolved by a cyclic or overlong binding chain");
        }
    }
}

impl Substitute for Type {
    fn substitute_mut(&mut self, subst: &Substitution) {
        if self.vars().any(|v| subst.contains(v)) {
            subst.resolve_except(self, &[]);
        }
    }
}

impl Substitute for TypeScheme {
    fn substitute_mut(&mut self, subst: &Substitution) {
        if self.ty.vars().any(|v| subst.contains(v) && !self.quantifiers.contains(v)) {
            subst.resolve_except(&mut self.ty, &self.quantifiers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_is_write_once() {
        let mut s = Substitution::new();
        assert!(s.bind(0.into(), Type::Int32).is_ok());
        assert_eq!(
            s.bind(0.into(), Type::Bool),
            Err(AlreadyBound(0.into(), Type::Int32))
        );
        assert_eq!(s.get(&0.into()), Some(&Type::Int32));
    }

    #[test]
    fn chains_are_chased() {
        let s: Substitution = [
            (0.into(), Type::function(Type::var(1), Type::var(2))),
            (1.into(), Type::slice(Type::var(2))),
            (2.into(), Type::Bool),
        ]
        .into_iter()
        .collect();
        let t = Type::var(0).substitute(&s);
        assert_eq!(t, Type::function(Type::slice(Type::Bool), Type::Bool));
        assert_eq!(t.clone().substitute(&s), t);
    }

    #[test]
    fn unbound_variables_are_kept() {
        let s: Substitution = [(0.into(), Type::Int32)].into_iter().collect();
        let t = Type::tuple([Type::var(0), Type::var(1)]).substitute(&s);
        assert_eq!(t, Type::tuple([Type::Int32, Type::var(1)]));
    }

    #[test]
    fn quantified_variables_are_not_substituted() {
        let s: Substitution = [("a".into(), Type::Int32), ("b".into(), Type::Bool)]
            .into_iter()
            .collect();
        let p = TypeScheme::new(Type::function(Type::var("a"), Type::var("b")), ["a"]).substitute(&s);
        assert_eq!(p.ty, Type::function(Type::var("a"), Type::Bool));
    }

    #[test]
    fn cyclic_bindings_unfold_once() {
        let mut s = Substitution::with_depth_limit(16);
        s.bind(0.into(), Type::slice(Type::var(0))).unwrap();
        assert_eq!(Type::var(0).substitute(&s), Type::slice(Type::var(0)));

        let mut s = Substitution::new();
        s.bind(0.into(), Type::tuple([Type::var(1), Type::var(0)])).unwrap();
        s.bind(1.into(), Type::function(Type::var(0), Type::Bool)).unwrap();
        let t = Type::var(0).substitute(&s);
        assert_eq!(
            t,
            Type::tuple([Type::function(Type::var(0), Type::Bool), Type::var(0)])
        );
    }

    #[test]
    fn deep_acyclic_types_resolve_completely() {
        let mut nested = Type::var(0);
        for _ in 0..600 {
            nested = Type::slice(nested);
        }
        let mut s = Substitution::with_depth_limit(8);
        s.bind(1.into(), nested).unwrap();
        s.bind(0.into(), Type::Int32).unwrap();
        let t = Type::var(1).substitute(&s);
        assert_eq!(t.vars().count(), 0);
    }

    #[test]
    fn depth_limit_is_at_least_one() {
        let s: Substitution = {
            let mut s = Substitution::with_depth_limit(0);
            s.bind(0.into(), Type::Int32).unwrap();
            s
        };
        assert_eq!(Type::var(0).substitute(&s), Type::Int32);
    }
}
