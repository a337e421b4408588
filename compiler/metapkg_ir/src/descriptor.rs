//! Parameter, signature and member descriptors.

use serde::{Deserialize, Serialize};

use crate::{TypeShape, UnitRef};

/// A single parameter, result value, or receiver.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Source name, empty for unnamed parameters.
    #[serde(default)]
    pub name: String,
    /// Import path of the unit that declared the parameter.
    #[serde(default)]
    pub owning_unit: String,
    #[serde(rename = "type")]
    pub ty: TypeShape,
    /// Set on receivers declared as `*T`.
    #[serde(default)]
    pub pointer_receiver: bool,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, owning_unit: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            owning_unit: owning_unit.into(),
            ty,
            pointer_receiver: false,
        }
    }

    /// Receiver of a method declared on `unit.type_name`.
    pub fn receiver(name: impl Into<String>, unit: &UnitRef, type_name: &str, pointer: bool) -> Self {
        Self::generic_receiver(name, unit, type_name, &[], pointer)
    }

    /// Receiver of a method declared on `unit.type_name[P1, P2, ...]`. The
    /// type parameters become [`TypeShape::TypeParam`] arguments.
    pub fn generic_receiver(
        name: impl Into<String>,
        unit: &UnitRef,
        type_name: &str,
        type_params: &[String],
        pointer: bool,
    ) -> Self {
        let named = TypeShape::Named {
            unit: Some(unit.clone()),
            name: type_name.to_string(),
            type_args: type_params
                .iter()
                .map(|name| TypeShape::TypeParam { name: name.clone() })
                .collect(),
        };
        Self {
            name: name.into(),
            owning_unit: unit.path.clone(),
            ty: if pointer {
                TypeShape::pointer(named)
            } else {
                named
            },
            pointer_receiver: pointer,
        }
    }
}

/// A function type or a function/method signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    #[serde(default)]
    pub results: Vec<ParamDescriptor>,
    /// The last parameter is `...T` (its shape is the `[]T` slice).
    #[serde(default)]
    pub variadic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Box<ParamDescriptor>>,
}

impl Signature {
    pub fn new(params: Vec<ParamDescriptor>, results: Vec<ParamDescriptor>) -> Self {
        Self {
            params,
            results,
            variadic: false,
            receiver: None,
        }
    }

    #[must_use]
    pub fn with_variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }

    pub(crate) fn for_each_unit(&self, f: &mut impl FnMut(&UnitRef)) {
        for param in self.params.iter().chain(&self.results) {
            param.ty.for_each_unit(f);
        }
    }

    pub(crate) fn mentions_type_param(&self) -> bool {
        self.params
            .iter()
            .chain(&self.results)
            .any(|p| p.ty.mentions_type_param())
    }
}

/// One candidate call target: an exported function or method.
///
/// Produced once by the member enumerator and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    pub name: String,
    /// The unit defining the member.
    pub unit: UnitRef,
    pub receiver: Option<ParamDescriptor>,
    pub params: Vec<ParamDescriptor>,
    pub results: Vec<ParamDescriptor>,
    pub variadic: bool,
    /// Type parameters of a generic function.
    pub type_params: Vec<String>,
}

impl MemberDescriptor {
    /// A free function of `unit`.
    pub fn function(unit: UnitRef, name: impl Into<String>, signature: &Signature) -> Self {
        Self {
            name: name.into(),
            unit,
            receiver: None,
            params: signature.params.clone(),
            results: signature.results.clone(),
            variadic: signature.variadic,
            type_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    /// A method of `unit` with the given receiver.
    pub fn method(
        unit: UnitRef,
        name: impl Into<String>,
        receiver: ParamDescriptor,
        signature: &Signature,
    ) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::function(unit, name, signature)
        }
    }

    /// Import path of the defining unit.
    pub fn unit_path(&self) -> &str {
        &self.unit.path
    }

    /// Name with any host disambiguation suffix (`init#1`, `Run$bound`)
    /// stripped.
    pub fn simple_name(&self) -> &str {
        self.name
            .split(['#', '$'])
            .next()
            .unwrap_or(self.name.as_str())
    }

    /// Name of the receiver's base type, through one pointer level.
    pub fn parent_type_name(&self) -> Option<&str> {
        let receiver = self.receiver.as_ref()?;
        let base = match &receiver.ty {
            TypeShape::Pointer { elem } => elem.as_ref(),
            other => other,
        };
        match base {
            TypeShape::Named { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The unit qualifying the receiver's base type.
    pub fn parent_type_unit(&self) -> Option<&UnitRef> {
        let receiver = self.receiver.as_ref()?;
        let base = match &receiver.ty {
            TypeShape::Pointer { elem } => elem.as_ref(),
            other => other,
        };
        match base {
            TypeShape::Named { unit, .. } => unit.as_ref(),
            _ => None,
        }
    }

    pub fn is_receiver_pointer(&self) -> bool {
        self.receiver
            .as_ref()
            .is_some_and(|r| matches!(r.ty, TypeShape::Pointer { .. }))
    }

    /// Whether the receiver's base type is unexported. Free functions are
    /// never parent-private.
    pub fn is_parent_type_private(&self) -> bool {
        self.parent_type_name()
            .and_then(|name| name.chars().next())
            .is_some_and(char::is_lowercase)
    }

    /// Whether the member declares type parameters, or any parameter,
    /// result or the receiver mentions one.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
            || self
                .params
                .iter()
                .chain(&self.results)
                .chain(self.receiver.as_ref())
                .any(|p| p.ty.mentions_type_param())
    }
}

/// Go's visibility convention: an identifier is exported iff its first
/// character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
