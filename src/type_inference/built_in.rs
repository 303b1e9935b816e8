use crate::model::typing::{Type, TypeScheme};
use crate::model::TypeEnvironment;
use std::sync::LazyLock;

fn monomorphic(params: impl IntoIterator<Item = Type>, ret: Type) -> TypeScheme {
    Type::function_of(params, ret).into()
}

fn polymorphic(ty: Type) -> TypeScheme {
    TypeScheme::new(ty, ["a"])
}

pub static BUILT_INS: LazyLock<TypeEnvironment> = LazyLock::new(|| {
    let a = || Type::var("a");
    let arithmetic = ["+", "-", "*", "/", "%"].map(|op| (op, monomorphic([Type::Int32, Type::Int32], Type::Int32)));
    let comparison = ["==", "!=", "<", "<=", ">", ">="]
        .map(|op| (op, polymorphic(Type::function_of([a(), a()], Type::Bool))));
    let logical = ["&&", "||"].map(|op| (op, monomorphic([Type::Bool, Type::Bool], Type::Bool)));
    let other = [
        ("neg", monomorphic([Type::Int32], Type::Int32)),
        ("!", monomorphic([Type::Bool], Type::Bool)),
        ("nil", polymorphic(Type::slice(a()))),
        ("cons", polymorphic(Type::function(a(), Type::function(Type::slice(a()), Type::slice(a()))))),
        ("head", polymorphic(Type::function(Type::slice(a()), a()))),
        ("tail", polymorphic(Type::function(Type::slice(a()), Type::slice(a())))),
        ("isEmpty", polymorphic(Type::function(Type::slice(a()), Type::Bool))),
        ("length", polymorphic(Type::function(Type::slice(a()), Type::Int32))),
    ];
    (arithmetic.into_iter())
        .chain(comparison)
        .chain(logical)
        .chain(other)
        .map(|(name, p)| (name.to_owned(), p))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_are_defined() {
        for op in ["+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||", "neg", "!"] {
            assert!(BUILT_INS.contains_name(op), "missing {op}");
        }
    }

    #[test]
    fn comparison_is_polymorphic() {
        let p = BUILT_INS.get("==").unwrap();
        assert_eq!(p.to_string(), "∀a. (a, a) → Bool");
    }

    #[test]
    fn list_primitives_are_curried() {
        let p = BUILT_INS.get("cons").unwrap();
        assert_eq!(p.to_string(), "∀a. (a) → ([a]) → [a]");
    }
}
