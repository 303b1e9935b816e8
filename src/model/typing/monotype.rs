use super::{TypeKind, Variable};
use std::{fmt::Display, iter};

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub enum Type {
    Void,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Array(ArrayType),
    Slice(Box<Type>),
    Pointer(PointerType),
    Struct(StructType),
    Enum(EnumType),
    Union(UnionType),
    Tuple(Vec<Type>),
    Function(FunctionType),
    Channel(ChannelType),
    Generic(String),
    Var(Variable),
    Refinement(RefinementType),
    Linear(LinearType),
    Effect(EffectType),
    Dependent(DependentType),
    Trait(TraitType),
    Any,
    Never,
    Unknown,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub length: usize,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct PointerType {
    pub pointee: Box<Type>,
    pub nullable: bool,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<(String, Type)>,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<String>,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<Type>,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
    pub is_variadic: bool,
    pub is_async: bool,
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChannelDirection {
    Both,
    Send,
    Receive,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct ChannelType {
    pub element: Box<Type>,
    pub direction: ChannelDirection,
}

/// A base type narrowed by a predicate. The predicate is opaque here; the refinement
/// solver owns its syntax.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct RefinementType {
    pub base: Box<Type>,
    pub predicate: String,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct LinearType {
    pub inner: Box<Type>,
    pub affine: bool,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct EffectType {
    pub inner: Box<Type>,
    pub effects: Vec<String>,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct DependentType {
    pub element: Box<Type>,
    pub index: String,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct TraitType {
    pub name: String,
    pub methods: Vec<String>,
}

impl From<Variable> for Type {
    fn from(value: Variable) -> Self {
        Self::Var(value)
    }
}

impl From<FunctionType> for Type {
    fn from(value: FunctionType) -> Self {
        Self::Function(value)
    }
}

impl FunctionType {
    pub fn new(parameters: impl IntoIterator<Item = Type>, return_type: impl Into<Type>) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
            return_type: Box::new(return_type.into()),
            is_variadic: false,
            is_async: false,
        }
    }
}

impl Type {
    pub fn function(m1: impl Into<Self>, m2: impl Into<Self>) -> Self {
        Self::Function(FunctionType::new([m1.into()], m2))
    }

    pub fn function_of(parameters: impl IntoIterator<Item = Type>, return_type: impl Into<Self>) -> Self {
        Self::Function(FunctionType::new(parameters, return_type))
    }

    pub fn array(element: impl Into<Self>, length: usize) -> Self {
        Self::Array(ArrayType {
            element: Box::new(element.into()),
            length,
        })
    }

    pub fn slice(element: impl Into<Self>) -> Self {
        Self::Slice(Box::new(element.into()))
    }

    pub fn pointer(pointee: impl Into<Self>) -> Self {
        Self::Pointer(PointerType {
            pointee: Box::new(pointee.into()),
            nullable: false,
        })
    }

    pub fn nullable_pointer(pointee: impl Into<Self>) -> Self {
        Self::Pointer(PointerType {
            pointee: Box::new(pointee.into()),
            nullable: true,
        })
    }

    pub fn structure(
        name: impl AsRef<str>,
        fields: impl IntoIterator<Item = (impl AsRef<str>, Type)>,
    ) -> Self {
        Self::Struct(StructType {
            name: name.as_ref().to_owned(),
            fields: (fields.into_iter())
                .map(|(n, t)| (n.as_ref().to_owned(), t))
                .collect(),
        })
    }

    pub fn tuple(elements: impl IntoIterator<Item = Type>) -> Self {
        Self::Tuple(elements.into_iter().collect())
    }

    pub fn var(v: impl Into<Variable>) -> Self {
        Self::Var(v.into())
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Void => TypeKind::Void,
            Self::Bool => TypeKind::Bool,
            Self::Int => TypeKind::Int,
            Self::Int8 => TypeKind::Int8,
            Self::Int16 => TypeKind::Int16,
            Self::Int32 => TypeKind::Int32,
            Self::Int64 => TypeKind::Int64,
            Self::UInt => TypeKind::UInt,
            Self::UInt8 => TypeKind::UInt8,
            Self::UInt16 => TypeKind::UInt16,
            Self::UInt32 => TypeKind::UInt32,
            Self::UInt64 => TypeKind::UInt64,
            Self::Float32 => TypeKind::Float32,
            Self::Float64 => TypeKind::Float64,
            Self::String => TypeKind::String,
            Self::Array(_) => TypeKind::Array,
            Self::Slice(_) => TypeKind::Slice,
            Self::Pointer(_) => TypeKind::Pointer,
            Self::Struct(_) => TypeKind::Struct,
            Self::Enum(_) => TypeKind::Enum,
            Self::Union(_) => TypeKind::Union,
            Self::Tuple(_) => TypeKind::Tuple,
            Self::Function(_) => TypeKind::Function,
            Self::Channel(_) => TypeKind::Channel,
            Self::Generic(_) => TypeKind::Generic,
            Self::Var(_) => TypeKind::TypeVar,
            Self::Refinement(_) => TypeKind::Refinement,
            Self::Linear(_) => TypeKind::Linear,
            Self::Effect(_) => TypeKind::Effect,
            Self::Dependent(_) => TypeKind::Dependent,
            Self::Trait(_) => TypeKind::Trait,
            Self::Any => TypeKind::Any,
            Self::Never => TypeKind::Never,
            Self::Unknown => TypeKind::Unknown,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn children(&self) -> Box<dyn Iterator<Item = &Type> + '_> {
        match self {
            Self::Array(a) => Box::new(iter::once(a.element.as_ref())),
            Self::Slice(t) => Box::new(iter::once(t.as_ref())),
            Self::Pointer(p) => Box::new(iter::once(p.pointee.as_ref())),
            Self::Struct(s) => Box::new(s.fields.iter().map(|(_, t)| t)),
            Self::Union(u) => Box::new(u.members.iter()),
            Self::Tuple(ts) => Box::new(ts.iter()),
            Self::Function(f) => Box::new(f.parameters.iter().chain(iter::once(f.return_type.as_ref()))),
            Self::Channel(c) => Box::new(iter::once(c.element.as_ref())),
            Self::Refinement(r) => Box::new(iter::once(r.base.as_ref())),
            Self::Linear(l) => Box::new(iter::once(l.inner.as_ref())),
            Self::Effect(e) => Box::new(iter::once(e.inner.as_ref())),
            Self::Dependent(d) => Box::new(iter::once(d.element.as_ref())),
            _ => Box::new(iter::empty()),
        }
    }

    pub fn children_mut(&mut self) -> Box<dyn Iterator<Item = &mut Type> + '_> {
        match self {
            Self::Array(a) => Box::new(iter::once(a.element.as_mut())),
            Self::Slice(t) => Box::new(iter::once(t.as_mut())),
            Self::Pointer(p) => Box::new(iter::once(p.pointee.as_mut())),
            Self::Struct(s) => Box::new(s.fields.iter_mut().map(|(_, t)| t)),
            Self::Union(u) => Box::new(u.members.iter_mut()),
            Self::Tuple(ts) => Box::new(ts.iter_mut()),
            Self::Function(f) => Box::new(
                (f.parameters.iter_mut()).chain(iter::once(f.return_type.as_mut())),
            ),
            Self::Channel(c) => Box::new(iter::once(c.element.as_mut())),
            Self::Refinement(r) => Box::new(iter::once(r.base.as_mut())),
            Self::Linear(l) => Box::new(iter::once(l.inner.as_mut())),
            Self::Effect(e) => Box::new(iter::once(e.inner.as_mut())),
            Self::Dependent(d) => Box::new(iter::once(d.element.as_mut())),
            _ => Box::new(iter::empty()),
        }
    }

    pub fn vars(&self) -> Box<dyn Iterator<Item = &Variable> + '_> {
        match self {
            Self::Var(v) => Box::new(iter::once(v)),
            _ => Box::new(self.children().flat_map(Type::vars)),
        }
    }

    pub fn vars_mut(&mut self) -> Box<dyn Iterator<Item = &mut Variable> + '_> {
        match self {
            Self::Var(v) => Box::new(iter::once(v)),
            _ => Box::new(self.children_mut().flat_map(Type::vars_mut)),
        }
    }

    pub fn occurs(&self, v: &Variable) -> bool {
        self.vars().any(|v2| v == v2)
    }
}

impl Display for ChannelDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => "chan".fmt(f),
            Self::Send => "chan<-".fmt(f),
            Self::Receive => "<-chan".fmt(f),
        }
    }
}

fn join(types: &[Type]) -> String {
    types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_async {
            "async ".fmt(f)?;
        }
        let mut params = self.parameters.iter().map(ToString::to_string).collect::<Vec<_>>();
        if self.is_variadic {
            if let Some(last) = params.last_mut() {
                *last = format!("...{last}");
            }
        }
        write!(f, "({}) → {}", params.join(", "), self.return_type)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Void => "Void".fmt(f),
            Self::Bool => "Bool".fmt(f),
            Self::Int => "Int".fmt(f),
            Self::Int8 => "Int8".fmt(f),
            Self::Int16 => "Int16".fmt(f),
            Self::Int32 => "Int32".fmt(f),
            Self::Int64 => "Int64".fmt(f),
            Self::UInt => "UInt".fmt(f),
            Self::UInt8 => "UInt8".fmt(f),
            Self::UInt16 => "UInt16".fmt(f),
            Self::UInt32 => "UInt32".fmt(f),
            Self::UInt64 => "UInt64".fmt(f),
            Self::Float32 => "Float32".fmt(f),
            Self::Float64 => "Float64".fmt(f),
            Self::String => "String".fmt(f),
            Self::Array(a) => write!(f, "[{}; {}]", a.element, a.length),
            Self::Slice(t) => write!(f, "[{t}]"),
            Self::Pointer(p) if p.nullable => write!(f, "?*{}", p.pointee),
            Self::Pointer(p) => write!(f, "*{}", p.pointee),
            Self::Struct(s) => {
                let fields = (s.fields.iter())
                    .map(|(n, t)| format!("{n}: {t}"))
                    .collect::<Vec<_>>();
                match s.name.as_str() {
                    "" => write!(f, "{{ {} }}", fields.join(", ")),
                    name => write!(f, "{name} {{ {} }}", fields.join(", ")),
                }
            }
            Self::Enum(e) => write!(f, "enum {}", e.name),
            Self::Union(u) => {
                let members = u.members.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}({})", u.name, members.join(" | "))
            }
            Self::Tuple(ts) if ts.len() == 1 => write!(f, "({},)", ts[0]),
            Self::Tuple(ts) => write!(f, "({})", join(ts)),
            Self::Function(fun) => fun.fmt(f),
            Self::Channel(c) => write!(f, "{} {}", c.direction, c.element),
            Self::Generic(name) => name.fmt(f),
            Self::Var(v) => v.fmt(f),
            Self::Refinement(r) => write!(f, "{{{} | {}}}", r.base, r.predicate),
            Self::Linear(l) if l.affine => write!(f, "affine {}", l.inner),
            Self::Linear(l) => write!(f, "linear {}", l.inner),
            Self::Effect(e) => write!(f, "{} ! {{{}}}", e.inner, e.effects.join(", ")),
            Self::Dependent(d) => write!(f, "[{}]{{{}}}", d.element, d.index),
            Self::Trait(t) => write!(f, "dyn {}", t.name),
            Self::Any => "Any".fmt(f),
            Self::Never => "Never".fmt(f),
            Self::Unknown => "Unknown".fmt(f),
        }
    }
}
