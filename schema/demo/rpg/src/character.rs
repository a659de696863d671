use crate::{shape::Shape, vocab::is_attribute};
use respack::prelude::*;
use std::collections::BTreeMap;

///
/// Character
/// Playable or hostile body with a collision shape and base attributes.
///

#[derive(Debug)]
pub struct Character {
    pub id: Id,
    pub name: String,
    pub level: (i64, i64),
    pub shape: Shape,
    pub attributes: BTreeMap<String, f64>,
}

impl Character {
    pub fn new(local: &str, name: &str, level: (i64, i64), shape: Shape) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            name: name.to_string(),
            level,
            shape,
            attributes: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn attribute(mut self, name: &str, value: f64) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    fn serialize_attributes(&self) -> Result<Option<Map<String, Value>>, ValidateError> {
        let path = Self::here("attributes");
        let Some(attributes) = expect_mapping(&self.attributes, &path, Rule::new())? else {
            return Ok(None);
        };

        for (name, value) in &attributes {
            if !is_attribute(name) {
                return Err(ValidateError::invalid(
                    &path.key(),
                    format!("must be an Attribute, got '{name}'"),
                ));
            }
            expect_float(value, &path.value(), Rule::new())?;
        }

        Ok(Some(attributes))
    }
}

impl Kind for Character {
    const TYPE: &'static str = "Character";
}

impl Record for Character {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, _: &FrozenRegistry) -> Result<Value, ValidateError> {
        let level = expect_ordered_range(&self.level, &Self::here("level"), Rule::range(0_i64, 99))?
            .map(|(lo, hi)| vec![lo, hi]);

        Ok(self
            .header()
            .with("name", expect_string(&self.name, &Self::here("name"), Rule::new())?)
            .with("level", level)
            .with("shape", self.shape.serialize(&Self::here("shape"))?)
            .with("attributes", self.serialize_attributes()?)
            .finish())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_shape_and_attributes() {
        let hero = Character::new("hero", "Hero", (1, 60), Shape::capsule(0.9, 0.3))
            .unwrap()
            .attribute("MaxHealth", 100.0)
            .attribute("Attack", 12.5);

        let value = hero.serialize(&Registry::new().freeze()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "Character.hero",
                "name": "Hero",
                "level": [1, 60],
                "shape": {"type": "Capsule", "half_height": 0.9, "radius": 0.3},
                "attributes": {"Attack": 12.5, "MaxHealth": 100.0}
            })
        );
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let err = Character::new("hero", "Hero", (1, 60), Shape::ball(0.5))
            .unwrap()
            .attribute("Charisma", 3.0)
            .serialize(&Registry::new().freeze())
            .unwrap_err();

        assert_eq!(err.to_string(), "Character ~ attributes.(key) => must be an Attribute, got 'Charisma'");
    }

    #[test]
    fn shape_errors_carry_the_shape_path() {
        let err = Character::new("slime", "Slime", (1, 5), Shape::ball(-0.5))
            .unwrap()
            .serialize(&Registry::new().freeze())
            .unwrap_err();

        assert_eq!(err.path, "Character ~ shape.radius");
    }
}
