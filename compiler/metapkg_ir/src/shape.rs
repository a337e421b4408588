//! Structural type descriptors.
//!
//! `TypeShape` is the closed type algebra the synthesizer dispatches on. It
//! mirrors what a Go type checker knows about a parameter or result: basic
//! types, named (nominal) types, and the composite constructors built on top.
//!
//! Shapes arrive from the loader as JSON, so every variant is serde-tagged by
//! `kind`.

use serde::{Deserialize, Serialize};

use crate::Signature;

/// A compiled program unit (Go package) as seen from a reference site.
///
/// `path` is the import path, `name` the package clause name used to qualify
/// identifiers. They differ for packages like `gopkg.in/yaml.v3` (`yaml`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitRef {
    pub path: String,
    pub name: String,
}

impl UnitRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// The `unsafe` pseudo-package, referenced by `unsafe.Pointer`.
    pub fn unsafe_unit() -> Self {
        Self::new("unsafe", "unsafe")
    }
}

/// Predeclared basic types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Byte,
    Rune,
    UnsafePointer,
}

impl BasicKind {
    /// Spelling inside the owning unit: `int`, `unsafe.Pointer`, ...
    pub fn spelling(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// The unit a reference to this type needs imported, if any.
    pub fn unit(self) -> Option<UnitRef> {
        match self {
            BasicKind::UnsafePointer => Some(UnitRef::unsafe_unit()),
            _ => None,
        }
    }
}

/// Channel direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// One method of an interface type literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    pub signature: Signature,
}

/// One field of a struct type literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeShape,
    #[serde(default)]
    pub embedded: bool,
    /// Raw tag text without its quotes, empty when the field has none.
    #[serde(default)]
    pub tag: String,
}

/// Structural type descriptor.
///
/// Exactly one variant is active. Composite variants always own their inner
/// shapes, so there is no "missing element" state to check for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// A predeclared basic type: `int`, `string`, `unsafe.Pointer`, ...
    Primitive { basic: BasicKind },

    /// A nominal type. `unit` is `None` for predeclared named types (`error`,
    /// `any`, `comparable`).
    Named {
        #[serde(default)]
        unit: Option<UnitRef>,
        name: String,
        /// Instantiation arguments, empty if non-generic.
        #[serde(default)]
        type_args: Vec<TypeShape>,
    },

    /// `*T`
    Pointer { elem: Box<TypeShape> },

    /// `[N]T`
    Array { len: u64, elem: Box<TypeShape> },

    /// `[]T`
    Slice { elem: Box<TypeShape> },

    /// `map[K]V`
    Map {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },

    /// `chan T`, `chan<- T`, `<-chan T`
    Channel {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeShape>,
    },

    /// An interface type literal.
    Interface {
        #[serde(default)]
        methods: Vec<InterfaceMethod>,
    },

    /// A struct type literal.
    Struct {
        #[serde(default)]
        fields: Vec<StructField>,
    },

    /// A function type.
    Signature(Box<Signature>),

    /// A generic type parameter. Never declarable outside its generic scope.
    TypeParam { name: String },
}

impl TypeShape {
    pub fn basic(basic: BasicKind) -> Self {
        TypeShape::Primitive { basic }
    }

    pub fn named(unit: Option<UnitRef>, name: impl Into<String>) -> Self {
        TypeShape::Named {
            unit,
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn pointer(elem: TypeShape) -> Self {
        TypeShape::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: TypeShape) -> Self {
        TypeShape::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeShape) -> Self {
        TypeShape::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        TypeShape::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn channel(dir: ChanDir, elem: TypeShape) -> Self {
        TypeShape::Channel {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn empty_interface() -> Self {
        TypeShape::Interface {
            methods: Vec::new(),
        }
    }

    pub fn empty_struct() -> Self {
        TypeShape::Struct { fields: Vec::new() }
    }

    pub fn signature(signature: Signature) -> Self {
        TypeShape::Signature(Box::new(signature))
    }

    /// Short human-readable variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeShape::Primitive { .. } => "primitive",
            TypeShape::Named { .. } => "named",
            TypeShape::Pointer { .. } => "pointer",
            TypeShape::Array { .. } => "array",
            TypeShape::Slice { .. } => "slice",
            TypeShape::Map { .. } => "map",
            TypeShape::Channel { .. } => "channel",
            TypeShape::Interface { .. } => "interface",
            TypeShape::Struct { .. } => "struct",
            TypeShape::Signature(_) => "signature",
            TypeShape::TypeParam { .. } => "type parameter",
        }
    }

    /// Call `f` for every unit a spelling of this type would reference.
    ///
    /// Walks all nested shapes, including signature parameters and results.
    pub fn for_each_unit(&self, f: &mut impl FnMut(&UnitRef)) {
        match self {
            TypeShape::Primitive { basic } => {
                if let Some(unit) = basic.unit() {
                    f(&unit);
                }
            }
            TypeShape::Named {
                unit, type_args, ..
            } => {
                if let Some(unit) = unit {
                    f(unit);
                }
                for arg in type_args {
                    arg.for_each_unit(f);
                }
            }
            TypeShape::Pointer { elem }
            | TypeShape::Array { elem, .. }
            | TypeShape::Slice { elem }
            | TypeShape::Channel { elem, .. } => elem.for_each_unit(f),
            TypeShape::Map { key, value } => {
                key.for_each_unit(f);
                value.for_each_unit(f);
            }
            TypeShape::Interface { methods } => {
                for method in methods {
                    method.signature.for_each_unit(f);
                }
            }
            TypeShape::Struct { fields } => {
                for field in fields {
                    field.ty.for_each_unit(f);
                }
            }
            TypeShape::Signature(signature) => signature.for_each_unit(f),
            TypeShape::TypeParam { .. } => {}
        }
    }

    /// Whether a type parameter occurs anywhere inside this shape.
    pub fn mentions_type_param(&self) -> bool {
        match self {
            TypeShape::TypeParam { .. } => true,
            TypeShape::Primitive { .. } => false,
            TypeShape::Named { type_args, .. } => {
                type_args.iter().any(TypeShape::mentions_type_param)
            }
            TypeShape::Pointer { elem }
            | TypeShape::Array { elem, .. }
            | TypeShape::Slice { elem }
            | TypeShape::Channel { elem, .. } => elem.mentions_type_param(),
            TypeShape::Map { key, value } => {
                key.mentions_type_param() || value.mentions_type_param()
            }
            TypeShape::Interface { methods } => methods
                .iter()
                .any(|m| m.signature.mentions_type_param()),
            TypeShape::Struct { fields } => fields.iter().any(|f| f.ty.mentions_type_param()),
            TypeShape::Signature(signature) => signature.mentions_type_param(),
        }
    }
}
