//! Shared wire types and serde helpers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal `{id, name}` reference to a user or property, embedded in
/// responses that hydrate loose foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Referenced row ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl NamedRef {
    /// Creates a new reference.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Serializes a `BTreeMap<String, Decimal>` with plain JSON numbers as
/// values, keeping the map's defined (sorted) key order.
///
/// `rust_decimal::serde::float` only covers struct fields, so grouped
/// breakdowns (category totals, hours per user) need this helper.
pub mod decimal_map {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use serde::de::{Deserializer, Error as DeError};
    use serde::ser::{SerializeMap, Serializer};
    use serde::Deserialize;

    /// Serializes map values as JSON numbers.
    pub fn serialize<S>(map: &BTreeMap<String, Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map {
            out.serialize_entry(key, &value.to_f64().unwrap_or(0.0))?;
        }
        out.end()
    }

    /// Deserializes JSON numbers back into decimals.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                Decimal::from_f64(value)
                    .map(|decimal| (key, decimal))
                    .ok_or_else(|| DeError::custom(format!("invalid decimal value: {value}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    use super::decimal_map;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "decimal_map")]
        by_category: BTreeMap<String, Decimal>,
    }

    #[test]
    fn test_serializes_values_as_numbers() {
        let mut by_category = BTreeMap::new();
        by_category.insert("maintenance".to_string(), dec!(120.50));
        by_category.insert("supplies".to_string(), dec!(40));

        let json = serde_json::to_string(&Wrapper { by_category }).unwrap();
        assert_eq!(
            json,
            r#"{"by_category":{"maintenance":120.5,"supplies":40.0}}"#
        );
    }

    #[test]
    fn test_round_trips() {
        let mut by_category = BTreeMap::new();
        by_category.insert("rent".to_string(), dec!(1500.25));
        let wrapper = Wrapper { by_category };

        let json = serde_json::to_string(&wrapper).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapper);
    }

    #[test]
    fn test_keys_sorted() {
        let mut by_category = BTreeMap::new();
        by_category.insert("utilities".to_string(), dec!(1));
        by_category.insert("marketing".to_string(), dec!(2));

        let json = serde_json::to_string(&Wrapper { by_category }).unwrap();
        let marketing = json.find("marketing").unwrap();
        let utilities = json.find("utilities").unwrap();
        assert!(marketing < utilities);
    }
}
