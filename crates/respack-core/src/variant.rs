use crate::{
    path::FieldPath,
    validate::{ValidateError, ValidateErrorKind},
    value::{TYPE_KEY, Value},
};

///
/// VariantSet
///
/// Closed set of concrete variant names for a polymorphic field, plus the
/// abstract base name that has no valid direct instance.
///

#[derive(Clone, Copy, Debug)]
pub struct VariantSet {
    pub base: &'static str,
    pub variants: &'static [&'static str],
}

impl VariantSet {
    #[must_use]
    pub const fn new(base: &'static str, variants: &'static [&'static str]) -> Self {
        Self { base, variants }
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.variants.contains(&tag)
    }

    /// Resolve a tag to its registered variant name.
    pub fn check(&self, tag: &str, path: &FieldPath) -> Result<&'static str, ValidateError> {
        if tag == self.base {
            return Err(ValidateError::new(
                path,
                ValidateErrorKind::AbstractVariant {
                    tag: tag.to_string(),
                },
            ));
        }

        self.variants
            .iter()
            .copied()
            .find(|&variant| variant == tag)
            .ok_or_else(|| {
                ValidateError::new(
                    path,
                    ValidateErrorKind::Enum {
                        allowed: self.variants.join(", "),
                        actual: tag.to_string(),
                    },
                )
            })
    }

    /// Read and check the discriminator of a loosely declared mapping.
    pub fn tag_of(&self, value: &Value, path: &FieldPath) -> Result<&'static str, ValidateError> {
        let tag_path = path.field(TYPE_KEY);

        match value.get(TYPE_KEY) {
            Some(Value::String(tag)) => self.check(tag, &tag_path),
            Some(other) => Err(ValidateError::new(
                &tag_path,
                ValidateErrorKind::type_error("a str", other),
            )),
            None => Err(ValidateError::new(
                &tag_path,
                ValidateErrorKind::Missing {
                    expected: "a variant name",
                },
            )),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidateClass;
    use serde_json::json;

    const SHAPES: VariantSet = VariantSet::new("Shape", &["Ball", "Cuboid"]);

    fn path() -> FieldPath {
        FieldPath::at("Character", "shape")
    }

    #[test]
    fn abstract_base_cannot_be_instantiated() {
        let err = SHAPES.check("Shape", &path()).unwrap_err();

        assert!(matches!(err.kind, ValidateErrorKind::AbstractVariant { .. }));
        assert_eq!(
            err.to_string(),
            "Character ~ shape => 'Shape' is abstract and cannot be instantiated"
        );
    }

    #[test]
    fn unknown_variant_is_an_enum_error() {
        let err = SHAPES.check("Torus", &path()).unwrap_err();
        assert_eq!(err.class(), ValidateClass::Enum);
    }

    #[test]
    fn tag_of_reads_discriminator() {
        assert_eq!(SHAPES.tag_of(&json!({"type": "Ball", "radius": 1}), &path()).unwrap(), "Ball");

        let err = SHAPES.tag_of(&json!({"radius": 1}), &path()).unwrap_err();
        assert_eq!(err.path, "Character ~ shape.type");
    }
}
