use super::{InferenceEngine, Result, TypeError};
use crate::model::typing::{Type, Variable};
use std::fmt::Display;
use tracing::trace;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ConstraintKind {
    Equal,
    Unify,
    /// `left` must be usable where `right` is expected.
    Subtype,
    /// `right` must be usable where `left` is expected.
    Supertype,
    Instance,
    Explicit,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
    pub kind: ConstraintKind,
}

impl Constraint {
    pub fn new(left: Type, right: Type, kind: ConstraintKind) -> Self {
        Self { left, right, kind }
    }

    pub fn unify(left: Type, right: Type) -> Self {
        Self::new(left, right, ConstraintKind::Unify)
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => "≡".fmt(f),
            Self::Unify => "~".fmt(f),
            Self::Subtype => "<:".fmt(f),
            Self::Supertype => ":>".fmt(f),
            Self::Instance => "≼".fmt(f),
            Self::Explicit => "=".fmt(f),
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.kind, self.right)
    }
}

impl InferenceEngine {
    /// Makes `m1` and `m2` equal by extending the substitution. On failure the
    /// substitution may hold bindings made before the conflict was found.
    pub fn unify(&mut self, m1: &Type, m2: &Type) -> Result<()> {
        self.solve(Constraint::unify(m1.clone(), m2.clone()))
    }

    pub fn solve(&mut self, constraint: Constraint) -> Result<()> {
        trace!(%constraint, "solving");
        match constraint.kind {
            ConstraintKind::Subtype => self.unify_subtype(&constraint.left, &constraint.right)?,
            ConstraintKind::Supertype => self.unify_subtype(&constraint.right, &constraint.left)?,
            _ => self.unify_at(&constraint.left, &constraint.right, 0)?,
        }
        self.solved.push(constraint);
        Ok(())
    }

    fn unify_subtype(&mut self, sub: &Type, sup: &Type) -> Result<()> {
        let sub = self.apply_substitutions(sub);
        let sup = self.apply_substitutions(sup);
        if sub.is_subtype_of(&sup) {
            Ok(())
        } else {
            self.unify_at(&sub, &sup, 0)
        }
    }

    fn unify_at(&mut self, m1: &Type, m2: &Type, depth: usize) -> Result<()> {
        if depth > self.config.max_unification_depth {
            return Err(TypeError::DepthExceeded(self.config.max_unification_depth));
        }
        let m1 = self.apply_substitutions(m1);
        let m2 = self.apply_substitutions(m2);
        match (m1, m2) {
            (m1, m2) if m1 == m2 => Ok(()),
            (Type::Var(v), m) | (m, Type::Var(v)) => self.unify_var(v, m, depth),
            (m1, m2) if m1.kind() != m2.kind() => Err(TypeError::KindMismatch(m1, m2)),
            (m1, m2) => self.unify_structure(&m1, &m2, depth + 1),
        }
    }

    fn unify_var(&mut self, v: Variable, m: Type, depth: usize) -> Result<()> {
        if let Some(bound) = self.substitution.get(&v).cloned() {
            return self.unify_at(&bound, &m, depth + 1);
        }
        if self.config.enable_occurs_check && m.occurs(&v) {
            return Err(TypeError::OccursCheckFailed(v, m));
        }
        trace!(var = %v, ty = %m, "binding");
        self.substitution.bind(v, m)?;
        Ok(())
    }

    fn unify_structure(&mut self, m1: &Type, m2: &Type, depth: usize) -> Result<()> {
        let arity = |expected: usize, found: usize| TypeError::ArityMismatch {
            left: m1.clone(),
            right: m2.clone(),
            expected,
            found,
        };
        let mismatch = || TypeError::TypeMismatch(m1.clone(), m2.clone());
        match (m1, m2) {
            (Type::Array(a1), Type::Array(a2)) => {
                if a1.length != a2.length {
                    return Err(TypeError::ArrayLengthMismatch(m1.clone(), m2.clone()));
                }
                self.unify_at(&a1.element, &a2.element, depth)
            }
            (Type::Slice(e1), Type::Slice(e2)) => self.unify_at(e1, e2, depth),
            (Type::Pointer(p1), Type::Pointer(p2)) if p1.nullable == p2.nullable => {
                self.unify_at(&p1.pointee, &p2.pointee, depth)
            }
            (Type::Function(f1), Type::Function(f2)) => {
                if f1.parameters.len() != f2.parameters.len() {
                    return Err(arity(f1.parameters.len(), f2.parameters.len()));
                }
                if f1.is_variadic != f2.is_variadic || f1.is_async != f2.is_async {
                    return Err(mismatch());
                }
                self.unify_all(&f1.parameters, &f2.parameters, depth)?;
                self.unify_at(&f1.return_type, &f2.return_type, depth)
            }
            (Type::Struct(s1), Type::Struct(s2)) => {
                if s1.fields.len() != s2.fields.len() {
                    return Err(arity(s1.fields.len(), s2.fields.len()));
                }
                for (name, t1) in &s1.fields {
                    let Some((_, t2)) = s2.fields.iter().find(|(n, _)| n == name) else {
                        return Err(TypeError::MissingField(name.clone(), m2.clone()));
                    };
                    self.unify_at(t1, t2, depth)?;
                }
                Ok(())
            }
            (Type::Tuple(ts1), Type::Tuple(ts2)) => {
                if ts1.len() != ts2.len() {
                    return Err(arity(ts1.len(), ts2.len()));
                }
                self.unify_all(ts1, ts2, depth)
            }
            (Type::Union(u1), Type::Union(u2)) if u1.name == u2.name => {
                if u1.members.len() != u2.members.len() {
                    return Err(arity(u1.members.len(), u2.members.len()));
                }
                self.unify_all(&u1.members, &u2.members, depth)
            }
            (Type::Channel(c1), Type::Channel(c2)) if c1.direction == c2.direction => {
                self.unify_at(&c1.element, &c2.element, depth)
            }
            (Type::Refinement(r1), Type::Refinement(r2)) if r1.predicate == r2.predicate => {
                self.unify_at(&r1.base, &r2.base, depth)
            }
            (Type::Linear(l1), Type::Linear(l2)) if l1.affine == l2.affine => {
                self.unify_at(&l1.inner, &l2.inner, depth)
            }
            (Type::Effect(e1), Type::Effect(e2)) if e1.effects == e2.effects => {
                self.unify_at(&e1.inner, &e2.inner, depth)
            }
            (Type::Dependent(d1), Type::Dependent(d2)) if d1.index == d2.index => {
                self.unify_at(&d1.element, &d2.element, depth)
            }
            _ => Err(mismatch()),
        }
    }

    fn unify_all(&mut self, ms1: &[Type], ms2: &[Type], depth: usize) -> Result<()> {
        for (m1, m2) in ms1.iter().zip(ms2) {
            self.unify_at(m1, m2, depth)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InferenceConfig;
    use crate::model::typing::FunctionType;

    fn unified(engine: &InferenceEngine, m: &Type) -> Type {
        engine.apply_substitutions(m)
    }

    #[test]
    fn binds_variable_on_either_side() {
        let mut engine = InferenceEngine::new();
        engine.unify(&Type::var(0), &Type::Int32).unwrap();
        engine.unify(&Type::Bool, &Type::var(1)).unwrap();
        assert_eq!(unified(&engine, &Type::var(0)), Type::Int32);
        assert_eq!(unified(&engine, &Type::var(1)), Type::Bool);
    }

    #[test]
    fn bound_variable_unifies_through_its_binding() {
        let mut engine = InferenceEngine::new();
        engine.unify(&Type::var(0), &Type::var(1)).unwrap();
        engine.unify(&Type::var(1), &Type::String).unwrap();
        assert!(engine.unify(&Type::var(0), &Type::String).is_ok());
        assert!(engine.unify(&Type::var(0), &Type::Bool).is_err());
    }

    #[test]
    fn functions_unify_componentwise() {
        let mut engine = InferenceEngine::new();
        let f1 = Type::function_of([Type::var(0), Type::Int32], Type::var(1));
        let f2 = Type::function_of([Type::Bool, Type::var(2)], Type::slice(Type::var(0)));
        engine.unify(&f1, &f2).unwrap();
        assert_eq!(
            unified(&engine, &f1),
            Type::function_of([Type::Bool, Type::Int32], Type::slice(Type::Bool))
        );
        assert_eq!(unified(&engine, &f1), unified(&engine, &f2));
    }

    #[test]
    fn occurs_check() {
        let mut engine = InferenceEngine::new();
        let err = engine.unify(&Type::var(0), &Type::slice(Type::var(0))).unwrap_err();
        assert_eq!(err, TypeError::OccursCheckFailed(0.into(), Type::slice(Type::var(0))));
    }

    #[test]
    fn occurs_check_can_be_disabled() {
        let config = InferenceConfig::default().with_occurs_check(false).with_max_unification_depth(32);
        let mut engine = InferenceEngine::with_config(config);
        assert!(engine.unify(&Type::var(0), &Type::slice(Type::var(0))).is_ok());
    }

    #[test]
    fn kind_mismatch() {
        let mut engine = InferenceEngine::new();
        let err = engine.unify(&Type::Int32, &Type::Bool).unwrap_err();
        assert_eq!(err, TypeError::KindMismatch(Type::Int32, Type::Bool));
        assert_eq!(err.to_string(), "cannot unify Int32 with Bool: int32 and bool are different kinds of type");
    }

    #[test]
    fn arity_mismatch() {
        let mut engine = InferenceEngine::new();
        let f1 = Type::function_of([Type::Int32], Type::Int32);
        let f2 = Type::function_of([Type::Int32, Type::Int32], Type::Int32);
        assert!(matches!(
            engine.unify(&f1, &f2),
            Err(TypeError::ArityMismatch { expected: 1, found: 2, .. })
        ));
        let t1 = Type::tuple([Type::Int32]);
        let t2 = Type::tuple([Type::var(0), Type::var(1)]);
        assert!(matches!(engine.unify(&t1, &t2), Err(TypeError::ArityMismatch { .. })));
    }

    #[test]
    fn function_flags_must_match() {
        let mut engine = InferenceEngine::new();
        let mut variadic = FunctionType::new([Type::Int32], Type::Void);
        variadic.is_variadic = true;
        let plain = Type::function(Type::var(0), Type::Void);
        assert!(matches!(
            engine.unify(&variadic.into(), &plain),
            Err(TypeError::TypeMismatch(..))
        ));
    }

    #[test]
    fn array_lengths_must_match() {
        let mut engine = InferenceEngine::new();
        assert!(matches!(
            engine.unify(&Type::array(Type::Int32, 3), &Type::array(Type::var(0), 4)),
            Err(TypeError::ArrayLengthMismatch(..))
        ));
        assert!(engine.unify(&Type::array(Type::Int32, 3), &Type::array(Type::var(0), 3)).is_ok());
    }

    #[test]
    fn pointer_nullability_must_match() {
        let mut engine = InferenceEngine::new();
        assert!(engine.unify(&Type::pointer(Type::Int32), &Type::nullable_pointer(Type::var(0))).is_err());
        assert!(engine.unify(&Type::pointer(Type::Int32), &Type::pointer(Type::var(0))).is_ok());
    }

    #[test]
    fn structs_unify_by_field_name() {
        let mut engine = InferenceEngine::new();
        let s1 = Type::structure("Point", [("x", Type::Int32), ("y", Type::var(0))]);
        let s2 = Type::structure("Pair", [("y", Type::Bool), ("x", Type::var(1))]);
        engine.unify(&s1, &s2).unwrap();
        assert_eq!(unified(&engine, &Type::var(0)), Type::Bool);
        assert_eq!(unified(&engine, &Type::var(1)), Type::Int32);

        let s3 = Type::structure("Point", [("x", Type::Int32), ("z", Type::Bool)]);
        assert!(matches!(engine.unify(&s1, &s3), Err(TypeError::MissingField(f, _)) if f == "x" || f == "y"));
    }

    #[test]
    fn depth_limit() {
        let config = InferenceConfig::default().with_max_unification_depth(2);
        let mut engine = InferenceEngine::with_config(config);
        let deep = |m: Type| Type::slice(Type::slice(Type::slice(Type::slice(m))));
        assert_eq!(
            engine.unify(&deep(Type::var(0)), &deep(Type::Int32)),
            Err(TypeError::DepthExceeded(2))
        );
    }

    #[test]
    fn subtype_constraints() {
        let mut engine = InferenceEngine::new();
        assert!(engine.solve(Constraint::new(Type::Never, Type::Int32, ConstraintKind::Subtype)).is_ok());
        assert!(engine.solve(Constraint::new(Type::Any, Type::Int32, ConstraintKind::Supertype)).is_ok());
        assert!(engine.solve(Constraint::new(Type::Int32, Type::Any, ConstraintKind::Supertype)).is_err());
        assert!(engine.solve(Constraint::new(Type::var(0), Type::Bool, ConstraintKind::Subtype)).is_ok());
        assert_eq!(engine.apply_substitutions(&Type::var(0)), Type::Bool);
        assert_eq!(engine.solved_constraints().len(), 3);
    }

    #[test]
    fn reset_forgets_bindings() {
        let mut engine = InferenceEngine::new();
        engine.unify(&Type::var(0), &Type::Int32).unwrap();
        engine.reset();
        assert!(engine.substitution().is_empty());
        assert!(engine.solved_constraints().is_empty());
        assert!(engine.unify(&Type::var(0), &Type::Bool).is_ok());
    }
}
