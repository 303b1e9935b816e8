use super::term::{Binding, Term};
use super::typing::{Type, TypeScheme, Variable};
use super::TypeEnvironment;
use std::collections::HashSet;

pub trait FreeVariable<V> {
    fn free_vars(&self) -> HashSet<&V>;
}

impl FreeVariable<Variable> for Type {
    fn free_vars(&self) -> HashSet<&Variable> {
        self.vars().collect()
    }
}

impl FreeVariable<Variable> for TypeScheme {
    fn free_vars(&self) -> HashSet<&Variable> {
        &self.ty.free_vars() - &HashSet::from_iter(self.quantifiers.iter())
    }
}

impl FreeVariable<Variable> for TypeEnvironment {
    fn free_vars(&self) -> HashSet<&Variable> {
        self.schemes().flat_map(TypeScheme::free_vars).collect()
    }
}

impl FreeVariable<String> for Term {
    fn free_vars(&self) -> HashSet<&String> {
        use Term::*;
        match self {
            Lit(..) => HashSet::new(),
            Var(x) => [x].into(),
            App(t1, t2) | BinOp(_, t1, t2) => t1.free_vars().union(&t2.free_vars()).copied().collect(),
            UnOp(_, t) => t.free_vars(),
            Abs(Binding::Var(x), _, t) => &t.free_vars() - &[x].into(),
            Abs(Binding::Discard, _, t) => t.free_vars(),
            Let(Binding::Var(x), _, t1, t2) => (&t2.free_vars() - &[x].into())
                .union(&t1.free_vars())
                .copied()
                .collect(),
            Let(Binding::Discard, _, t1, t2) => t2.free_vars().union(&t1.free_vars()).copied().collect(),
            Fix(f, Binding::Var(x), t) => &t.free_vars() - &[f, x].into(),
            Fix(f, Binding::Discard, t) => &t.free_vars() - &[f].into(),
            If(t1, t2, t3) => [t1, t2, t3].into_iter().flat_map(|t| t.free_vars()).collect(),
            Tuple(ts) => ts.iter().flat_map(Term::free_vars).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_excludes_quantifiers() {
        let p = TypeScheme::new(Type::function(Type::var("a"), Type::var(1)), ["a"]);
        assert_eq!(p.free_vars(), HashSet::from([&Variable::Inferred(1)]));
    }

    #[test]
    fn term_free_variables() {
        let t = Term::let_in(
            "f",
            Term::fix("f", "x", Term::app(Term::var("f"), Term::var("y"))),
            Term::app(Term::var("f"), Term::var("z")),
        );
        let y = "y".to_owned();
        let z = "z".to_owned();
        assert_eq!(t.free_vars(), HashSet::from([&y, &z]));
    }

    #[test]
    fn environment_includes_parents() {
        let mut global = TypeEnvironment::new();
        global.define("x", Type::var(0));
        global.define("id", TypeScheme::new(Type::function(Type::var("a"), Type::var("a")), ["a"]));
        let mut inner = global.push();
        inner.define("y", Type::slice(Type::var(1)));
        let free = inner.free_vars();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&Variable::Inferred(0)));
        assert!(free.contains(&Variable::Inferred(1)));
    }
}
