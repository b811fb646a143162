use std::{collections::HashSet, fmt::Display};

use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

/// Value category a generation slot may be constrained to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    String,
    Object,
    Number,
    Boolean,
    Function,
    /// Only meaningful in a request: the slot takes whatever comes.
    Any,
}

pub type TypeSet = HashSet<Type>;

impl Type {
    pub const CONCRETE: [Type; 5] = [
        Type::String,
        Type::Object,
        Type::Number,
        Type::Boolean,
        Type::Function,
    ];

    /// Every concrete category. This is what an untyped generator supports.
    pub fn all() -> TypeSet {
        Self::CONCRETE.into_iter().collect()
    }

    pub fn any() -> TypeSet {
        [Type::Any].into_iter().collect()
    }

    pub fn only(self) -> TypeSet {
        [self].into_iter().collect()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::String => "string",
            Type::Object => "object",
            Type::Number => "number",
            Type::Boolean => "boolean",
            Type::Function => "function",
            Type::Any => "any",
        };
        write!(f, "{name}")
    }
}

/// Can a generator supporting `supported` fill a slot asking for `required`?
pub fn accepts(required: &TypeSet, supported: &TypeSet) -> bool {
    required.contains(&Type::Any) || !required.is_disjoint(supported)
}

pub fn is_universal(supported: &TypeSet) -> bool {
    Type::CONCRETE.iter().all(|t| supported.contains(t))
}

/// Stable, human readable rendering of a set, e.g. `number|string`.
pub fn describe(types: &TypeSet) -> String {
    if types.is_empty() {
        return "nothing".to_string();
    }
    types.iter().sorted().join("|")
}
