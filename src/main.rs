use anyhow::Context;
use hindley_milner_core::model::term::{BinaryOp, Term};
use hindley_milner_core::model::typing::Type;
use hindley_milner_core::{BidirectionalChecker, Expr, InferenceConfig, InferenceEngine};
use std::{env, fs};

fn load_config() -> anyhow::Result<InferenceConfig> {
    let Some(path) = env::args().nth(1) else {
        return Ok(InferenceConfig::default());
    };
    let text = fs::read_to_string(&path).with_context(|| format!("failed to read config file {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config in {path}"))
}

fn programs() -> Vec<Term> {
    let id = Term::abs("x", Term::var("x"));
    let double = Term::abs("x", Term::binary(BinaryOp::Add, Term::var("x"), Term::var("x")));
    vec![
        Term::let_in(
            "id",
            id,
            Term::tuple([
                Term::app(Term::var("id"), Term::lit(1)),
                Term::app(Term::var("id"), Term::lit(true)),
            ]),
        ),
        Term::let_in("double", double, Term::app(Term::var("double"), Term::lit(5))),
        Term::app(Term::app(Term::var("cons"), Term::lit("head")), Term::var("nil")),
        Term::if_else(Term::lit(true), Term::lit(1), Term::lit("one")),
        Term::abs("x", Term::app(Term::var("x"), Term::var("x"))),
    ]
}

fn checks() -> Vec<(Expr, Type)> {
    vec![
        (
            Expr::lambda("x", Expr::var("x")),
            Type::function(Type::Int32, Type::Int32),
        ),
        (
            Expr::lambda("x", Expr::var("x")),
            Type::function(Type::String, Type::Bool),
        ),
        (
            Expr::annotated(
                Expr::lambda("x", Expr::lit(0)),
                Type::function(Type::Any, Type::Int32),
            ),
            Type::function(Type::Int32, Type::Int32),
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = load_config()?;

    let mut engine = InferenceEngine::with_config(config);
    for term in programs() {
        println!("type checking expression: {term}");
        match engine.infer_type(&term) {
            Ok(m) => println!("type: {m}"),
            Err(e) => println!("error: {e}"),
        }
        engine.reset();
    }

    let mut checker = BidirectionalChecker::new(engine);
    for (expr, expected) in checks() {
        println!("checking {expr} against {expected}");
        match checker.check_expression(&expr, &expected) {
            Ok(m) => println!("type: {m}"),
            Err(e) => println!("error: {e}"),
        }
    }
    println!("{} error(s) recorded", checker.get_errors().len());
    Ok(())
}
