use std::fmt::Display;

#[derive(Hash, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TypeKind {
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
    Array,
    Slice,
    Pointer,
    Struct,
    Enum,
    Union,
    Tuple,
    Function,
    Channel,
    Generic,
    TypeVar,
    Refinement,
    Linear,
    Effect,
    Dependent,
    Trait,
    Any,
    Never,
    Unknown,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt => "uint",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Array => "array",
            Self::Slice => "slice",
            Self::Pointer => "pointer",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Tuple => "tuple",
            Self::Function => "function",
            Self::Channel => "channel",
            Self::Generic => "generic",
            Self::TypeVar => "type variable",
            Self::Refinement => "refinement",
            Self::Linear => "linear",
            Self::Effect => "effect",
            Self::Dependent => "dependent",
            Self::Trait => "trait",
            Self::Any => "any",
            Self::Never => "never",
            Self::Unknown => "unknown",
        };
        name.fmt(f)
    }
}

impl TypeKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_primitive(self) -> bool {
        self.is_numeric() || matches!(self, Self::Void | Self::Bool | Self::String)
    }
}
