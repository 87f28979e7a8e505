//! Runtime type metadata used by arity/type contracts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Runtime type of a [`Value`], plus the wildcard `Any`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Wildcard: matches every value.
    Any,
    Null,
    Bool,
    Number,
    Text,
    List,
    Set,
    Map,
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ValueType::Any => "any",
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::Text => "text",
            ValueType::List => "list",
            ValueType::Set => "set",
            ValueType::Map => "map",
        };
        f.write_str(name)
    }
}

/// Set of runtime types acceptable at one input position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSet(BTreeSet<ValueType>);

impl TypeSet {
    /// The wildcard set.
    pub fn any() -> Self {
        Self::of(ValueType::Any)
    }

    pub fn of(ty: ValueType) -> Self {
        Self(BTreeSet::from([ty]))
    }

    pub fn is_any(&self) -> bool {
        self.0.contains(&ValueType::Any)
    }

    pub fn contains(&self, ty: ValueType) -> bool {
        self.0.contains(&ty)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.0.iter().copied()
    }

    /// Whether a concrete runtime value satisfies this set.
    pub fn accepts(&self, value: &Value) -> bool {
        self.is_any() || self.contains(value.value_type())
    }

    /// Whether a statically declared type may flow into this set.
    ///
    /// `Any` on either side is compatible with everything.
    pub fn admits(&self, ty: ValueType) -> bool {
        ty == ValueType::Any || self.is_any() || self.contains(ty)
    }

    /// Intersection of two sets, treating `Any` as the universal set.
    pub fn narrow(&self, other: &TypeSet) -> TypeSet {
        if self.is_any() {
            return other.clone();
        }
        if other.is_any() {
            return self.clone();
        }
        TypeSet(self.0.intersection(&other.0).copied().collect())
    }
}

impl FromIterator<ValueType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ValueType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl core::fmt::Display for TypeSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_accepts_everything() {
        let any = TypeSet::any();
        assert!(any.accepts(&Value::Null));
        assert!(any.accepts(&Value::from("x")));
        assert!(any.admits(ValueType::Set));
    }

    #[test]
    fn concrete_set_rejects_other_kinds() {
        let numbers = TypeSet::of(ValueType::Number);
        assert!(numbers.accepts(&Value::Int(3)));
        assert!(numbers.accepts(&Value::Float(3.5)));
        assert!(!numbers.accepts(&Value::from("3")));
        assert!(!numbers.accepts(&Value::Null));
        assert!(numbers.admits(ValueType::Any));
        assert!(!numbers.admits(ValueType::Bool));
    }

    #[test]
    fn narrowing_treats_any_as_universal() {
        let numbers = TypeSet::of(ValueType::Number);
        assert_eq!(TypeSet::any().narrow(&numbers), numbers);
        assert_eq!(numbers.narrow(&TypeSet::any()), numbers);

        let mixed: TypeSet = [ValueType::Number, ValueType::Text].into_iter().collect();
        let text = TypeSet::of(ValueType::Text);
        assert_eq!(mixed.narrow(&text), text);
        assert!(numbers.narrow(&text).is_empty());
        assert_eq!(mixed.to_string(), "number | text");
    }
}
