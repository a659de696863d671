//! Random value pools rolled onto accessories. Both pool kinds are tagged
//! with their type so a consumer can tell them apart in a mixed list.

use crate::{
    entry::Entry,
    levels::{expect_attributes_list, expect_entries_list, level_count},
    vocab::expect_attribute,
};
use respack::prelude::*;
use std::collections::BTreeSet;

const RANDOM_ID_RANGE: (i64, i64) = (0, 65535);

// check_pool
// shared max_level + non-empty + unique random_id checks
fn check_pool(
    max_level: i64,
    random_ids: &[i64],
    root: &'static str,
) -> Result<usize, ValidateError> {
    let level_path = FieldPath::at(root, "max_level");
    let max_level = require(
        expect_int(&max_level, &level_path, Rule::range(0, 99))?,
        &level_path,
        i64::EXPECTED,
    )?;

    let values_path = FieldPath::at(root, "values");
    if random_ids.is_empty() {
        return Err(ValidateError::new(
            &values_path,
            ValidateErrorKind::TooShort { min: 1, actual: 0 },
        ));
    }

    let (lo, hi) = RANDOM_ID_RANGE;
    let id_path = values_path.item().field("random_id");
    let mut seen = BTreeSet::new();
    for &random_id in random_ids {
        expect_int(&random_id, &id_path, Rule::range(lo, hi))?;
        if !seen.insert(random_id) {
            return Err(ValidateError::invalid(
                &id_path,
                format!("random_id {random_id} is not unique"),
            ));
        }
    }

    Ok(level_count(max_level))
}

///
/// RandomAttribute
///

#[derive(Clone, Debug)]
pub struct RandomAttribute {
    pub random_id: i64,
    pub attribute: String,
    pub values: Vec<f64>,
}

impl RandomAttribute {
    #[must_use]
    pub fn new(random_id: i64, attribute: &str, values: &[f64]) -> Self {
        Self {
            random_id,
            attribute: attribute.to_string(),
            values: values.to_vec(),
        }
    }
}

///
/// RandomAttributes
/// Pool of attribute rolls; every roll lists one value per level.
///

#[derive(Debug)]
pub struct RandomAttributes {
    pub id: Id,
    pub max_level: i64,
    pub values: Vec<RandomAttribute>,
}

impl RandomAttributes {
    pub fn new(local: &str, max_level: i64) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            max_level,
            values: Vec::new(),
        })
    }

    #[must_use]
    pub fn roll(mut self, roll: RandomAttribute) -> Self {
        self.values.push(roll);
        self
    }
}

impl Kind for RandomAttributes {
    const TYPE: &'static str = "RandomAttributes";
}

impl Record for RandomAttributes {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, _: &FrozenRegistry) -> Result<Value, ValidateError> {
        let levels = check_pool(
            self.max_level,
            &self.values.iter().map(|roll| roll.random_id).collect::<Vec<_>>(),
            Self::TYPE,
        )?;

        let item_path = Self::here("values").item();
        let values = self
            .values
            .iter()
            .map(|roll| {
                Ok(FieldMap::new()
                    .with("random_id", roll.random_id)
                    .with("attribute", expect_attribute(&roll.attribute, &item_path.field("attribute"))?)
                    .with(
                        "values",
                        expect_attributes_list(&roll.values, levels, &item_path.field("values"))?,
                    )
                    .finish())
            })
            .collect::<Result<Vec<_>, ValidateError>>()?;

        let fields = self
            .header()
            .with("max_level", self.max_level)
            .with("values", values);

        Ok(tagged(Self::TYPE, fields).finish())
    }
}

///
/// RandomEntry
///

#[derive(Clone, Debug)]
pub struct RandomEntry {
    pub random_id: i64,
    pub entry: String,
    pub values: Vec<(i64, i64)>,
}

impl RandomEntry {
    #[must_use]
    pub fn new(random_id: i64, entry: &str, values: &[(i64, i64)]) -> Self {
        Self {
            random_id,
            entry: entry.to_string(),
            values: values.to_vec(),
        }
    }
}

///
/// RandomEntries
/// Pool of entry rolls; each roll references an `Entry` and lists a
/// `[piece, plus]` pair per level.
///

#[derive(Debug)]
pub struct RandomEntries {
    pub id: Id,
    pub max_level: i64,
    pub values: Vec<RandomEntry>,
}

impl RandomEntries {
    pub fn new(local: &str, max_level: i64) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            max_level,
            values: Vec::new(),
        })
    }

    #[must_use]
    pub fn roll(mut self, roll: RandomEntry) -> Self {
        self.values.push(roll);
        self
    }
}

impl Kind for RandomEntries {
    const TYPE: &'static str = "RandomEntries";
}

impl Record for RandomEntries {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let levels = check_pool(
            self.max_level,
            &self.values.iter().map(|roll| roll.random_id).collect::<Vec<_>>(),
            Self::TYPE,
        )?;

        let item_path = Self::here("values").item();
        let values = self
            .values
            .iter()
            .map(|roll| {
                Ok(FieldMap::new()
                    .with("random_id", roll.random_id)
                    .with(
                        "entry",
                        expect_resource_reference(
                            &roll.entry,
                            Entry::TYPE,
                            &item_path.field("entry"),
                            registry,
                            Rule::new(),
                        )?,
                    )
                    .with(
                        "values",
                        expect_entries_list(&roll.values, levels, &item_path.field("values"))?,
                    )
                    .finish())
            })
            .collect::<Result<Vec<_>, ValidateError>>()?;

        let fields = self
            .header()
            .with("max_level", self.max_level)
            .with("values", values);

        Ok(tagged(Self::TYPE, fields).finish())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> FrozenRegistry {
        let mut reg = Registry::new();
        reg.register(Entry::new("fury", "Attack", 2).unwrap()).unwrap();
        reg.freeze()
    }

    #[test]
    fn attribute_pool_serializes_rolls() {
        let pool = RandomAttributes::new("ring", 2)
            .unwrap()
            .roll(RandomAttribute::new(1, "Attack", &[1.0, 2.0]));

        assert_eq!(
            pool.serialize(&registry()).unwrap(),
            json!({
                "type": "RandomAttributes",
                "id": "RandomAttributes.ring",
                "max_level": 2,
                "values": [{"random_id": 1, "attribute": "Attack", "values": [1.0, 2.0]}]
            })
        );
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = RandomAttributes::new("ring", 2)
            .unwrap()
            .serialize(&registry())
            .unwrap_err();

        assert_eq!(err.to_string(), "RandomAttributes ~ values => size must be at least 1, got 0");
    }

    #[test]
    fn random_ids_are_unique_and_bounded() {
        let err = RandomAttributes::new("ring", 1)
            .unwrap()
            .roll(RandomAttribute::new(1, "Attack", &[1.0]))
            .roll(RandomAttribute::new(1, "Defense", &[1.0]))
            .serialize(&registry())
            .unwrap_err();
        assert_eq!(err.path, "RandomAttributes ~ values.(item).random_id");

        let err = RandomEntries::new("gems", 1)
            .unwrap()
            .roll(RandomEntry::new(70_000, "Entry.fury", &[(1, 0)]))
            .serialize(&registry())
            .unwrap_err();
        assert_eq!(err.class(), ValidateClass::Range);
    }

    #[test]
    fn entry_rolls_resolve_their_entry() {
        let pool = RandomEntries::new("gems", 2)
            .unwrap()
            .roll(RandomEntry::new(0, "Entry.fury", &[(1, 0), (1, 1)]));
        let value = pool.serialize(&registry()).unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"type":"RandomEntries","id":"RandomEntries.gems","max_level":2,"values":[{"random_id":0,"entry":"Entry.fury","values":[[1,0],[1,1]]}]}"#
        );

        let err = RandomEntries::new("gems", 1)
            .unwrap()
            .roll(RandomEntry::new(0, "Entry.calm", &[(1, 0)]))
            .serialize(&registry())
            .unwrap_err();
        assert_eq!(err.to_string(), "RandomEntries ~ values.(item).entry => Entry.calm not found");
    }
}
