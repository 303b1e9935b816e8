use super::built_in::BUILT_INS;
use super::{Constraint, Result, TypeError};
use crate::config::InferenceConfig;
use crate::model::typing::{Type, TypeScheme, Variable};
use crate::model::{FreeVariable, Substitute, Substitution, TypeEnvironment};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, trace, warn};

#[derive(Clone, Debug)]
pub struct InferenceEngine {
    pub(super) config: InferenceConfig,
    pub(super) substitution: Substitution,
    next_var: usize,
    env: TypeEnvironment,
    pub(super) solved: Vec<Constraint>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    pub fn with_config(config: InferenceConfig) -> Self {
        let config = config.with_max_unification_depth(config.max_unification_depth);
        if !config.enable_occurs_check {
            warn!("occurs check disabled, cyclic types will be accepted");
        }
        Self {
            config,
            substitution: Substitution::with_depth_limit(config.max_unification_depth),
            next_var: 0,
            env: BUILT_INS.clone(),
            solved: Vec::new(),
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        while self.pop_environment().is_ok() {}
        self.substitution.clear();
        self.next_var = 0;
        self.solved.clear();
        debug!("engine reset");
    }

    pub fn fresh_type_var(&mut self) -> Type {
        let v = Variable::Inferred(self.next_var);
        self.next_var += 1;
        Type::Var(v)
    }

    pub fn environment(&self) -> &TypeEnvironment {
        &self.env
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    pub fn solved_constraints(&self) -> &[Constraint] {
        &self.solved
    }

    pub fn push_environment(&mut self) {
        self.env = std::mem::take(&mut self.env).push();
        debug!(level = self.env.level(), "entered scope");
    }

    pub fn pop_environment(&mut self) -> Result<()> {
        if self.env.is_global() {
            return Err(TypeError::ScopeUnderflow);
        }
        if let Some(parent) = std::mem::take(&mut self.env).pop() {
            self.env = parent;
        }
        debug!(level = self.env.level(), "left scope");
        Ok(())
    }

    pub fn scoped<T>(
        &mut self,
        bindings: impl IntoIterator<Item = (String, TypeScheme)>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.push_environment();
        self.env.extend(bindings);
        let result = f(self);
        self.pop_environment()?;
        result
    }

    pub fn define(&mut self, name: impl Into<String>, scheme: impl Into<TypeScheme>) {
        self.env.define(name, scheme);
    }

    pub fn define_global(&mut self, name: impl Into<String>, scheme: impl Into<TypeScheme>) {
        let mut scopes = Vec::new();
        while !self.env.is_global() {
            let scope = std::mem::take(&mut self.env);
            scopes.push(scope.iter().map(|(n, p)| (n.clone(), p.clone())).collect::<Vec<_>>());
            if let Some(outer) = scope.pop() {
                self.env = outer;
            }
        }
        self.env.define(name, scheme);
        for bindings in scopes.into_iter().rev() {
            self.env = std::mem::take(&mut self.env).push();
            self.env.extend(bindings);
        }
    }

    pub fn lookup_variable(&self, name: &str) -> Result<&TypeScheme> {
        (self.env.lookup_variable(name)).ok_or_else(|| TypeError::UndefinedVariable(name.to_owned()))
    }

    pub fn apply_substitutions(&self, m: &Type) -> Type {
        m.clone().substitute(&self.substitution)
    }

    pub fn generalize(&self, m: &Type) -> TypeScheme {
        let ty = self.apply_substitutions(m);
        let level = self.env.level();
        if !self.config.enable_let_polymorphism {
            return TypeScheme::monomorphic(ty).at_level(level);
        }
        let env_vars = self.environment_vars();
        let mut quantifiers = (ty.free_vars().into_iter())
            .filter(|v| !env_vars.contains(*v))
            .cloned()
            .collect::<Vec<_>>();
        quantifiers.sort();
        let p = TypeScheme {
            quantifiers,
            ty,
            level,
        };
        debug!(scheme = %p, "generalized");
        p
    }

    pub fn instantiate(&mut self, p: &TypeScheme) -> Type {
        let (m, n) = p.instantiate(self.next_var);
        self.next_var = n;
        if !p.is_monomorphic() {
            debug!(scheme = %p, instance = %m, "instantiated");
        }
        m
    }

    fn environment_vars(&self) -> HashSet<Variable> {
        (self.env.schemes())
            .flat_map(|p| {
                let p = p.clone().substitute(&self.substitution);
                p.free_vars().into_iter().cloned().collect::<Vec<_>>()
            })
            .collect()
    }

    pub(crate) fn trace_judgment(&self, judgment: &str, subject: &dyn Display) {
        if self.config.verbose_mode {
            debug!(judgment, %subject, "judgment");
        } else {
            trace!(judgment, %subject, "judgment");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_variables_are_distinct() {
        let mut engine = InferenceEngine::new();
        let a = engine.fresh_type_var();
        let b = engine.fresh_type_var();
        assert_ne!(a, b);
        assert_eq!(a, Type::var(0));
    }

    #[test]
    fn global_scope_cannot_be_popped() {
        let mut engine = InferenceEngine::new();
        assert_eq!(engine.pop_environment(), Err(TypeError::ScopeUnderflow));
        engine.push_environment();
        assert!(engine.pop_environment().is_ok());
    }

    #[test]
    fn scoped_pops_on_error() {
        let mut engine = InferenceEngine::new();
        let result: Result<()> = engine.scoped([("x".to_owned(), TypeScheme::from(Type::Int32))], |engine| {
            assert!(engine.lookup_variable("x").is_ok());
            Err(TypeError::ScopeUnderflow)
        });
        assert!(result.is_err());
        assert!(engine.environment().is_global());
        assert!(engine.lookup_variable("x").is_err());
    }

    #[test]
    fn define_global_from_nested_scope() {
        let mut engine = InferenceEngine::new();
        engine.push_environment();
        engine.define("local", Type::Bool);
        engine.push_environment();
        engine.define_global("answer", Type::Int32);
        assert_eq!(engine.environment().level(), 2);
        assert!(engine.lookup_variable("local").is_ok());
        engine.reset();
        assert_eq!(engine.lookup_variable("answer").map(|p| &p.ty), Ok(&Type::Int32));
        assert!(engine.lookup_variable("local").is_err());
    }

    #[test]
    fn generalize_skips_environment_variables() {
        let mut engine = InferenceEngine::new();
        let a = engine.fresh_type_var();
        let b = engine.fresh_type_var();
        engine.define("x", a.clone());
        let p = engine.generalize(&Type::function(a, b));
        assert_eq!(p.quantifiers, vec![Variable::Inferred(1)]);
    }

    #[test]
    fn generalize_without_let_polymorphism() {
        let engine = InferenceEngine::with_config(InferenceConfig::default().with_let_polymorphism(false));
        let p = engine.generalize(&Type::function(Type::var(0), Type::var(0)));
        assert!(p.is_monomorphic());
    }

    #[test]
    fn instantiate_advances_counter() {
        let mut engine = InferenceEngine::new();
        let p = TypeScheme::new(Type::function(Type::var("a"), Type::var("b")), ["a", "b"]);
        let m1 = engine.instantiate(&p);
        let m2 = engine.instantiate(&p);
        assert_eq!(m1, Type::function(Type::var(0), Type::var(1)));
        assert_eq!(m2, Type::function(Type::var(2), Type::var(3)));
    }

    #[test]
    fn zero_depth_config_still_resolves() {
        let config = InferenceConfig {
            max_unification_depth: 0,
            ..InferenceConfig::default()
        };
        let mut engine = InferenceEngine::with_config(config);
        assert_eq!(engine.config().max_unification_depth, 1);
        let a = engine.fresh_type_var();
        engine.unify(&a, &Type::Int32).unwrap();
        assert_eq!(engine.apply_substitutions(&a), Type::Int32);
    }
}
