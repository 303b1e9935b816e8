use super::Type;

impl Type {
    pub fn can_convert_to(&self, target: &Type) -> bool {
        match (self, target) {
            (s, t) if s == t => true,
            (_, Type::Any) | (Type::Never, _) => true,
            (s, t) if s.is_numeric() && t.is_numeric() => true,
            (Type::Pointer(p1), Type::Pointer(p2)) => p1.nullable && !p2.nullable && p1.pointee == p2.pointee,
            (Type::Array(a), Type::Slice(element)) => a.element == *element,
            _ => false,
        }
    }

    pub fn is_subtype_of(&self, sup: &Type) -> bool {
        match (self, sup) {
            (s, t) if s == t => true,
            (_, Type::Any) | (Type::Never, _) => true,
            (Type::Struct(_), Type::Struct(_)) => self.is_structural_subtype(sup),
            (Type::Tuple(ts1), Type::Tuple(ts2)) => {
                ts1.len() == ts2.len() && ts1.iter().zip(ts2).all(|(t1, t2)| t1.is_subtype_of(t2))
            }
            (Type::Refinement(r), t) => r.base.is_subtype_of(t),
            (Type::Function(f1), Type::Function(f2)) => {
                f1.parameters.len() == f2.parameters.len()
                    && f1.is_variadic == f2.is_variadic
                    && f1.is_async == f2.is_async
                    && (f1.parameters.iter().zip(&f2.parameters)).all(|(p1, p2)| p2.is_subtype_of(p1))
                    && f1.return_type.is_subtype_of(&f2.return_type)
            }
            _ => false,
        }
    }

    pub fn is_assignable_from(&self, source: &Type) -> bool {
        source.is_subtype_of(self) || source.can_convert_to(self)
    }

    pub fn is_structural_subtype(&self, sup: &Type) -> bool {
        let (Type::Struct(sub), Type::Struct(sup)) = (self, sup) else {
            return false;
        };
        sup.fields.iter().all(|(name, t2)| {
            (sub.fields.iter())
                .find(|(n, _)| n == name)
                .is_some_and(|(_, t1)| t1.is_subtype_of(t2))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_kinds_convert_to_each_other() {
        assert!(Type::Int8.can_convert_to(&Type::Float64));
        assert!(Type::Float32.can_convert_to(&Type::UInt64));
        assert!(!Type::Int32.can_convert_to(&Type::String));
        assert!(!Type::Bool.can_convert_to(&Type::Int32));
    }

    #[test]
    fn nullable_pointer_conversion_is_one_way() {
        let nullable = Type::nullable_pointer(Type::Int32);
        let non_null = Type::pointer(Type::Int32);
        assert!(nullable.can_convert_to(&non_null));
        assert!(!non_null.can_convert_to(&nullable));
        assert!(!nullable.can_convert_to(&Type::pointer(Type::Int64)));
    }

    #[test]
    fn array_converts_to_slice_of_same_element() {
        assert!(Type::array(Type::Int32, 8).can_convert_to(&Type::slice(Type::Int32)));
        assert!(!Type::array(Type::Int32, 8).can_convert_to(&Type::slice(Type::Int64)));
        assert!(!Type::slice(Type::Int32).can_convert_to(&Type::array(Type::Int32, 8)));
    }

    #[test]
    fn top_and_bottom() {
        assert!(Type::String.can_convert_to(&Type::Any));
        assert!(Type::Never.can_convert_to(&Type::Bool));
        assert!(Type::Never.is_subtype_of(&Type::slice(Type::Int32)));
        assert!(Type::slice(Type::Int32).is_subtype_of(&Type::Any));
        assert!(!Type::Any.is_subtype_of(&Type::Int32));
    }

    #[test]
    fn struct_width_subtyping() {
        let point = Type::structure("Point", [("x", Type::Int32), ("y", Type::Int32)]);
        let point3 = Type::structure(
            "Point3",
            [("x", Type::Int32), ("y", Type::Int32), ("z", Type::Int32)],
        );
        assert!(point3.is_structural_subtype(&point));
        assert!(!point.is_structural_subtype(&point3));
        assert!(point3.is_subtype_of(&point));
    }

    #[test]
    fn function_variance() {
        let wide = Type::function(Type::Any, Type::Int32);
        let narrow = Type::function(Type::Int32, Type::Int32);
        assert!(wide.is_subtype_of(&narrow));
        assert!(!narrow.is_subtype_of(&wide));
        let returns_never = Type::function(Type::Int32, Type::Never);
        assert!(returns_never.is_subtype_of(&narrow));
    }

    #[test]
    fn assignability() {
        assert!(Type::Int64.is_assignable_from(&Type::Int8));
        assert!(Type::Any.is_assignable_from(&Type::Bool));
        assert!(!Type::Bool.is_assignable_from(&Type::String));
    }
}
