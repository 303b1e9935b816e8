mod conversion;
mod kind;
mod monotype;
mod polytype;
mod variable;

pub use kind::TypeKind;
pub use monotype::{
    ArrayType, ChannelDirection, ChannelType, DependentType, EffectType, EnumType, FunctionType,
    LinearType, PointerType, RefinementType, StructType, TraitType, Type, UnionType,
};
pub use polytype::TypeScheme;
pub use variable::Variable;
