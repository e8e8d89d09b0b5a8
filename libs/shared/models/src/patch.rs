//! Field presence for partial updates.
//!
//! A JSON body can omit a field, send it as `null`, or send a value. `Option<T>`
//! collapses the first two, so update requests use [`Patch<T>`] instead. Pair it
//! with `#[serde(default)]` so an omitted field deserializes as [`Patch::Missing`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the request body.
    Missing,
    /// Field was present and explicitly `null`.
    Null,
    /// Field was present with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Value(value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

// `Missing` must be skipped by the container with
// `skip_serializing_if = "Patch::is_missing"`; otherwise it is written as null.
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(value) => serializer.serialize_some(value),
            Patch::Missing | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Update {
        #[serde(default, skip_serializing_if = "Patch::is_missing")]
        name: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_missing")]
        age: Patch<i32>,
    }

    #[test]
    fn test_distinguishes_missing_null_and_value() {
        let update: Update = serde_json::from_value(json!({ "name": null, "age": 40 })).unwrap();
        assert_eq!(update.name, Patch::Null);
        assert_eq!(update.age, Patch::Value(40));

        let update: Update = serde_json::from_value(json!({})).unwrap();
        assert!(update.name.is_missing());
        assert!(update.age.is_missing());
    }

    #[test]
    fn test_missing_fields_are_not_serialized() {
        let update = Update {
            name: Patch::Missing,
            age: Patch::Value(12),
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "age": 12 }));
    }

    #[test]
    fn test_into_value() {
        assert_eq!(Patch::Value(3).into_value(), Some(3));
        assert_eq!(Patch::<i32>::Null.into_value(), None);
        assert_eq!(Patch::<i32>::Missing.as_value(), None);
    }
}
