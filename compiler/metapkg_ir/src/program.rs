//! Whole-program typed IR handed over by a program loader.
//!
//! This is the contract between the host loader and the synthesis core: the
//! member table of every loaded unit, the types it declares, and enough
//! information to compute the method set of `*T` for any declared `T`.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{ParamDescriptor, Signature, TypeShape, UnitRef};

/// Every unit reachable from the load target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedProgram {
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One loaded and type-checked unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub path: String,
    pub name: String,
    /// Type-check errors reported by the host, empty when the unit is sound.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Top-level members in host member-table order.
    #[serde(default)]
    pub members: Vec<Member>,
}

/// A top-level member of a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Func(FuncMember),
    Type(TypeMember),
    Var { name: String },
    Const { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncMember {
    pub name: String,
    /// Declared type parameters, empty unless the function is generic.
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub signature: Signature,
}

/// A declared type together with its declared methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    pub name: String,
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Underlying type, used to promote interface methods through embedding.
    #[serde(default)]
    pub underlying: Option<TypeShape>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// Embedded fields whose methods are promoted.
    #[serde(default)]
    pub embedded: Vec<EmbeddedField>,
}

/// A method declared directly on a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub receiver_name: String,
    #[serde(default)]
    pub pointer_receiver: bool,
    #[serde(default)]
    pub signature: Signature,
}

/// An embedded field of a struct type, naming a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedField {
    /// Unit declaring the embedded type; `None` means the embedding unit.
    #[serde(default)]
    pub unit: Option<UnitRef>,
    pub name: String,
    #[serde(default)]
    pub pointer: bool,
}

/// One entry of a method set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSetEntry {
    pub name: String,
    /// Unit declaring the method (the embedded type's unit when promoted).
    pub unit: UnitRef,
    /// Receiver as declared on the method's own type.
    pub receiver: ParamDescriptor,
    pub signature: Signature,
    /// Embedding depth: 0 for methods declared on the type itself.
    pub depth: usize,
}

impl TypedProgram {
    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.path == path)
    }

    fn lookup_type(&self, unit: &UnitRef, name: &str) -> Option<&TypeMember> {
        self.package(&unit.path)?
            .members
            .iter()
            .find_map(|member| match member {
                Member::Type(ty) if ty.name == name => Some(ty),
                _ => None,
            })
    }

    /// The method set of `*T` for the type `name` declared in `unit`.
    ///
    /// Includes value and pointer receiver methods of `T` and methods promoted
    /// through embedded fields. A shallower method shadows deeper ones; a name
    /// reachable twice at the same depth is ambiguous and dropped, along with
    /// every deeper method of that name. That includes one type embedded
    /// along two paths of equal depth. Entries are sorted by name.
    ///
    /// Receivers of generic types carry their type parameters as type
    /// arguments, so the resulting members report as generic.
    pub fn pointer_method_set(&self, unit: &UnitRef, name: &str) -> Vec<MethodSetEntry> {
        let mut chosen: FxHashMap<String, Option<MethodSetEntry>> = FxHashMap::default();
        let mut visited: FxHashSet<(String, String)> = FxHashSet::default();
        let mut level: Vec<(UnitRef, String)> = vec![(unit.clone(), name.to_string())];
        let mut depth = 0;

        while !level.is_empty() {
            let mut found: FxHashMap<String, Vec<MethodSetEntry>> = FxHashMap::default();
            let mut next = Vec::new();

            // A type reached along several paths at one depth contributes
            // each of its methods once per path, which makes them ambiguous.
            let mut grouped: Vec<(UnitRef, String, usize)> = Vec::new();
            for (owner, type_name) in level {
                match grouped
                    .iter_mut()
                    .find(|(unit, name, _)| unit.path == owner.path && *name == type_name)
                {
                    Some((_, _, paths)) => *paths += 1,
                    None => grouped.push((owner, type_name, 1)),
                }
            }

            for (owner, type_name, paths) in grouped {
                if !visited.insert((owner.path.clone(), type_name.clone())) {
                    continue;
                }
                let Some(ty) = self.lookup_type(&owner, &type_name) else {
                    continue;
                };

                for method in &ty.methods {
                    let entry = MethodSetEntry {
                        name: method.name.clone(),
                        unit: owner.clone(),
                        receiver: ParamDescriptor::generic_receiver(
                            method.receiver_name.clone(),
                            &owner,
                            &type_name,
                            &ty.type_params,
                            method.pointer_receiver,
                        ),
                        signature: method.signature.clone(),
                        depth,
                    };
                    found
                        .entry(method.name.clone())
                        .or_default()
                        .extend(std::iter::repeat(entry).take(paths));
                }

                // Interfaces have no methods on `*I`; only promoted ones count.
                if depth > 0 {
                    if let Some(TypeShape::Interface { methods }) = &ty.underlying {
                        for method in methods {
                            let entry = MethodSetEntry {
                                name: method.name.clone(),
                                unit: owner.clone(),
                                receiver: ParamDescriptor::generic_receiver(
                                    String::new(),
                                    &owner,
                                    &type_name,
                                    &ty.type_params,
                                    false,
                                ),
                                signature: method.signature.clone(),
                                depth,
                            };
                            found
                                .entry(method.name.clone())
                                .or_default()
                                .extend(std::iter::repeat(entry).take(paths));
                        }
                    }
                }

                for field in &ty.embedded {
                    let field_unit = field.unit.clone().unwrap_or_else(|| owner.clone());
                    for _ in 0..paths {
                        next.push((field_unit.clone(), field.name.clone()));
                    }
                }
            }

            for (method_name, mut entries) in found {
                if chosen.contains_key(&method_name) {
                    continue;
                }
                let entry = if entries.len() == 1 { entries.pop() } else { None };
                chosen.insert(method_name, entry);
            }

            level = next;
            depth += 1;
        }

        let mut methods: Vec<MethodSetEntry> = chosen.into_values().flatten().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }
}
