use super::{BidirectionalError, Expr, Result};
use crate::model::typing::{Type, TypeScheme};
use crate::type_inference::InferenceEngine;

#[derive(PartialEq, Clone, Debug)]
pub enum Mode {
    Synthesize,
    Check(Type),
}

#[derive(Debug)]
pub struct BidirectionalChecker {
    engine: InferenceEngine,
    errors: Vec<BidirectionalError>,
}

impl BidirectionalChecker {
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            errors: Vec::new(),
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut InferenceEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> InferenceEngine {
        self.engine
    }

    pub fn get_errors(&self) -> &[BidirectionalError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn check_expression(&mut self, expr: &Expr, expected: &Type) -> Result<Type> {
        self.judge(expr, &Mode::Check(expected.clone()))
    }

    pub fn synthesize_type(&mut self, expr: &Expr) -> Result<Type> {
        self.judge(expr, &Mode::Synthesize)
    }

    pub fn judge(&mut self, expr: &Expr, mode: &Mode) -> Result<Type> {
        let m = match mode {
            Mode::Synthesize => {
                self.engine.trace_judgment("synthesize", expr);
                self.synthesize(expr)?
            }
            Mode::Check(expected) => {
                self.engine.trace_judgment("check", expr);
                self.check(expr, expected)?
            }
        };
        Ok(self.engine.apply_substitutions(&m))
    }

    fn fail(&mut self, err: BidirectionalError) -> BidirectionalError {
        self.errors.push(err.clone());
        err
    }

    fn lookup(&mut self, name: &str, context: &str, expr: &Expr) -> Result<Type> {
        match self.engine.lookup_variable(name).cloned() {
            Ok(p) => Ok(self.engine.instantiate(&p)),
            Err(e) => {
                let message = e.to_string();
                Err(self.fail(BidirectionalError::new(context, message, expr).caused_by(e)))
            }
        }
    }

    fn unify(&mut self, actual: &Type, expected: &Type, context: &str, expr: &Expr) -> Result<()> {
        self.engine.unify(actual, expected).map_err(|e| {
            let err = BidirectionalError::new(context, e.to_string(), expr)
                .expected(self.engine.apply_substitutions(expected))
                .actual(self.engine.apply_substitutions(actual))
                .caused_by(e);
            self.fail(err)
        })
    }

    fn function_parts(&mut self, m: &Type, context: &str, expr: &Expr) -> Result<(Type, Type)> {
        match m {
            Type::Function(f) if f.parameters.len() == 1 => {
                Ok((f.parameters[0].clone(), f.return_type.as_ref().clone()))
            }
            Type::Var(_) => {
                let param = self.engine.fresh_type_var();
                let ret = self.engine.fresh_type_var();
                self.unify(m, &Type::function(param.clone(), ret.clone()), context, expr)?;
                Ok((param, ret))
            }
            _ => Err(self.fail(
                BidirectionalError::new(context, "expected a single-parameter function", expr).actual(m.clone()),
            )),
        }
    }

    fn in_scope<T>(
        &mut self,
        name: &str,
        p: TypeScheme,
        expr: &Expr,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.engine.push_environment();
        self.engine.define(name, p);
        let result = f(self);
        if let Err(e) = self.engine.pop_environment() {
            return Err(self.fail(BidirectionalError::new("scope", e.to_string(), expr).caused_by(e)));
        }
        result
    }

    fn check_condition(&mut self, cond: &Expr) -> Result<()> {
        let m = self.judge(cond, &Mode::Synthesize)?;
        (self.engine.unify(&m, &Type::Bool)).map_err(|e| {
            let err = BidirectionalError::new("check if condition", "condition must be boolean", cond)
                .expected(Type::Bool)
                .actual(self.engine.apply_substitutions(&m))
                .caused_by(e);
            self.fail(err)
        })
    }

    fn synthesize(&mut self, expr: &Expr) -> Result<Type> {
        match expr {
            Expr::Lit(lit) => Ok(lit.default_type()),
            Expr::Var(x) => self.lookup(x, "synthesize variable", expr),
            Expr::App(e1, e2) => {
                let m1 = self.judge(e1, &Mode::Synthesize)?;
                let (param, ret) = self.function_parts(&m1, "synthesize application", expr)?;
                self.judge(e2, &Mode::Check(param))?;
                Ok(ret)
            }
            Expr::Annotated(e, m) => {
                self.judge(e, &Mode::Check(m.clone()))?;
                Ok(m.clone())
            }
            Expr::If(cond, e1, e2) => {
                self.check_condition(cond)?;
                let m = self.judge(e1, &Mode::Synthesize)?;
                self.judge(e2, &Mode::Check(m.clone()))?;
                Ok(m)
            }
            Expr::Binary(op, e1, e2) => {
                let m_op = self.lookup(op.symbol(), "synthesize binary expression", expr)?;
                let m1 = self.judge(e1, &Mode::Synthesize)?;
                let m2 = self.judge(e2, &Mode::Synthesize)?;
                let beta = self.engine.fresh_type_var();
                let call = Type::function_of([m1, m2], beta.clone());
                self.unify(&call, &m_op, "synthesize binary expression", expr)?;
                Ok(beta)
            }
            Expr::Lambda(x, _) => Err(self.fail(BidirectionalError::new(
                "synthesize lambda",
                format!("cannot infer the type of parameter '{x}'; annotate the lambda or check it against a function type"),
                expr,
            ))),
        }
    }

    fn check(&mut self, expr: &Expr, expected: &Type) -> Result<Type> {
        let expected = self.engine.apply_substitutions(expected);
        match expr {
            Expr::Lambda(x, body) => {
                let (param, ret) = self.function_parts(&expected, "check lambda", expr)?;
                self.in_scope(x, param.into(), expr, |checker| {
                    checker.judge(body, &Mode::Check(ret))
                })?;
                Ok(expected)
            }
            Expr::Annotated(e, m) => {
                self.check_subsumption(m, &expected, expr)?;
                self.judge(e, &Mode::Check(m.clone()))?;
                Ok(expected)
            }
            Expr::If(cond, e1, e2) => {
                self.check_condition(cond)?;
                let m1 = self.judge(e1, &Mode::Check(expected.clone()))?;
                let m2 = self.judge(e2, &Mode::Check(expected))?;
                let m1 = self.engine.apply_substitutions(&m1);
                let m2 = self.engine.apply_substitutions(&m2);
                if m1 != m2 {
                    let err = BidirectionalError::new("check if-else", "if-else branches must have same type", expr)
                        .expected(m1)
                        .actual(m2);
                    return Err(self.fail(err));
                }
                Ok(m1)
            }
            _ => {
                let actual = self.judge(expr, &Mode::Synthesize)?;
                self.check_subsumption(&actual, &expected, expr)?;
                Ok(expected)
            }
        }
    }

    /// Parameters are compared contravariantly; pairs still holding variables are unified.
    pub fn check_subsumption(&mut self, actual: &Type, expected: &Type, expr: &Expr) -> Result<()> {
        let actual = self.engine.apply_substitutions(actual);
        let expected = self.engine.apply_substitutions(expected);
        match (&actual, &expected) {
            (m1, m2) if m1 == m2 => Ok(()),
            (Type::Var(_), _) | (_, Type::Var(_)) => self.unify(&actual, &expected, "subsumption", expr),
            (Type::Function(f1), Type::Function(f2))
                if f1.parameters.len() == f2.parameters.len()
                    && f1.is_variadic == f2.is_variadic
                    && f1.is_async == f2.is_async =>
            {
                for (p1, p2) in f1.parameters.iter().zip(&f2.parameters) {
                    self.check_subsumption(p2, p1, expr)?;
                }
                self.check_subsumption(&f1.return_type, &f2.return_type, expr)
            }
            (m1, m2) if m1.is_subtype_of(m2) => Ok(()),
            (m1, m2) if m1.vars().next().is_some() || m2.vars().next().is_some() => {
                self.unify(&actual, &expected, "subsumption", expr)
            }
            _ => {
                let err = BidirectionalError::new("subsumption", format!("{actual} is not compatible with {expected}"), expr)
                    .expected(expected.clone())
                    .actual(actual.clone());
                Err(self.fail(err))
            }
        }
    }
}
