use super::{InferenceEngine, Result, TypeError};
use crate::model::term::{Binding, Term};
use crate::model::typing::{Type, TypeScheme};

impl InferenceEngine {
    pub fn infer_type(&mut self, term: &Term) -> Result<Type> {
        let m = w(self, term)?;
        Ok(self.apply_substitutions(&m))
    }
}

fn bind(b: &Binding, p: TypeScheme) -> Option<(String, TypeScheme)> {
    match b {
        Binding::Var(x) => Some((x.clone(), p)),
        Binding::Discard => None,
    }
}

fn abstraction(engine: &mut InferenceEngine, b: &Binding, m: Option<&Type>, t: &Term) -> Result<Type> {
    let beta = match m {
        Some(m) => m.clone(),
        None => engine.fresh_type_var(),
    };
    let m = engine.scoped(bind(b, TypeScheme::monomorphic(beta.clone())), |engine| w(engine, t))?;
    Ok(engine.apply_substitutions(&Type::function(beta, m)))
}

pub fn w(engine: &mut InferenceEngine, term: &Term) -> Result<Type> {
    engine.trace_judgment("synthesize", term);
    match term {
        Term::Lit(lit, m) => Ok(m.clone().unwrap_or_else(|| lit.default_type())),
        Term::Var(x) => {
            let p = engine.lookup_variable(x)?.clone();
            Ok(engine.instantiate(&p))
        }
        Term::App(t1, t2) => {
            let m1 = w(engine, t1)?;
            let m2 = w(engine, t2)?;
            let beta = engine.fresh_type_var();
            (engine.unify(&m1, &Type::function(m2, beta.clone())))
                .map_err(|e| e.in_judgment(format!("cannot apply {t1} to {t2}")))?;
            Ok(engine.apply_substitutions(&beta))
        }
        Term::Abs(b, m, t) => abstraction(engine, b, m.as_ref(), t),
        Term::Let(b, annotation, t1, t2) => {
            let m1 = w(engine, t1)?;
            if let Some(m) = annotation {
                engine.unify(m, &m1).map_err(|e| TypeError::AnnotationMismatch {
                    annotation: m.clone(),
                    inferred: engine.apply_substitutions(&m1),
                    source: Box::new(e),
                })?;
            }
            let p = engine.generalize(&m1);
            engine.scoped(bind(b, p), |engine| w(engine, t2))
        }
        Term::Fix(f, b, t) => {
            let beta = engine.fresh_type_var();
            let m1 = engine.scoped([(f.clone(), TypeScheme::monomorphic(beta.clone()))], |engine| {
                abstraction(engine, b, None, t)
            })?;
            (engine.unify(&beta, &m1))
                .map_err(|e| e.in_judgment(format!("recursive use of '{f}' does not match its definition")))?;
            Ok(engine.apply_substitutions(&m1))
        }
        Term::If(t1, t2, t3) => {
            let m1 = w(engine, t1)?;
            (engine.unify(&m1, &Type::Bool)).map_err(|e| e.in_judgment("condition must be boolean"))?;
            let m2 = w(engine, t2)?;
            let m3 = w(engine, t3)?;
            (engine.unify(&m2, &m3)).map_err(|e| e.in_judgment("if-else branches must have same type"))?;
            Ok(engine.apply_substitutions(&m2))
        }
        Term::BinOp(op, t1, t2) => {
            let p = engine.lookup_variable(op.symbol())?.clone();
            let m_op = engine.instantiate(&p);
            let m1 = w(engine, t1)?;
            let m2 = w(engine, t2)?;
            let beta = engine.fresh_type_var();
            (engine.unify(&m_op, &Type::function_of([m1, m2], beta.clone())))
                .map_err(|e| e.in_judgment(format!("invalid operands for '{op}'")))?;
            Ok(engine.apply_substitutions(&beta))
        }
        Term::UnOp(op, t) => {
            let p = engine.lookup_variable(op.name())?.clone();
            let m_op = engine.instantiate(&p);
            let m = w(engine, t)?;
            let beta = engine.fresh_type_var();
            (engine.unify(&m_op, &Type::function(m, beta.clone())))
                .map_err(|e| e.in_judgment(format!("invalid operand for '{op}'")))?;
            Ok(engine.apply_substitutions(&beta))
        }
        Term::Tuple(ts) => {
            let mut ms = Vec::with_capacity(ts.len());
            for t in ts {
                ms.push(w(engine, t)?);
            }
            Ok(engine.apply_substitutions(&Type::Tuple(ms)))
        }
    }
}
