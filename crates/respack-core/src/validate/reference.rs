use crate::{
    id::Id,
    path::FieldPath,
    registry::RecordSet,
    validate::{Declared, Rule, ValidateError, ValidateErrorKind, present},
    value::Value,
};

/// Check that `value` names a registered record of `expected_type`.
///
/// Runs at serialization time, so a record may reference one declared
/// later in program order.
pub fn expect_resource_reference<D: Declared + ?Sized>(
    value: &D,
    expected_type: &str,
    path: &FieldPath,
    records: &RecordSet,
    rule: Rule,
) -> Result<Option<Id>, ValidateError> {
    const EXPECTED: &str = "a ResID";

    let Some(value) = present(value, &rule, path, EXPECTED)? else {
        return Ok(None);
    };

    let Value::String(raw) = &value else {
        return Err(ValidateError::new(
            path,
            ValidateErrorKind::type_error(EXPECTED, &value),
        ));
    };

    let record = records
        .resolve(raw, expected_type)
        .map_err(|err| ValidateError::reference(path, err))?;

    Ok(Some(record.id().clone()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registry::{Registry, RegistryError},
        test_support::{Gadget, Widget},
        validate::ValidateClass,
    };
    use serde_json::json;

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.register(Widget::new("a", 1)).unwrap();
        reg.register(Gadget::new("g")).unwrap();
        reg
    }

    fn path() -> FieldPath {
        FieldPath::at("Gadget", "target")
    }

    #[test]
    fn accepts_registered_reference() {
        let reg = registry().freeze();
        let id = expect_resource_reference(&"Widget.a", "Widget", &path(), &reg, Rule::new())
            .unwrap()
            .unwrap();

        assert_eq!(id.as_str(), "Widget.a");
    }

    #[test]
    fn rejects_wrong_prefix_and_missing_records() {
        let reg = registry().freeze();

        let err = expect_resource_reference(&"Gadget.g", "Widget", &path(), &reg, Rule::new())
            .unwrap_err();
        assert_eq!(err.class(), ValidateClass::Reference);
        assert!(matches!(
            err.kind,
            ValidateErrorKind::Reference(RegistryError::TypeMismatch { .. })
        ));
        assert_eq!(err.to_string(), "Gadget ~ target => Gadget.g is not a Widget id");

        let err = expect_resource_reference(&"Widget.b", "Widget", &path(), &reg, Rule::new())
            .unwrap_err();
        assert!(matches!(
            err.kind,
            ValidateErrorKind::Reference(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn non_string_reference_is_a_type_error() {
        let reg = registry().freeze();
        let err = expect_resource_reference(&json!(7), "Widget", &path(), &reg, Rule::new())
            .unwrap_err();

        assert_eq!(err.class(), ValidateClass::Type);
    }

    #[test]
    fn optional_reference_may_be_absent() {
        let reg = registry().freeze();
        let absent: Option<Id> = None;

        assert!(
            expect_resource_reference(&absent, "Widget", &path(), &reg, Rule::new().optional())
                .unwrap()
                .is_none()
        );
    }
}
