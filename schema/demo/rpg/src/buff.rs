use crate::script::Script;
use respack::prelude::*;
use std::collections::BTreeMap;

///
/// Buff
///
/// Passive effect. `arguments` lists the variables a holder may override,
/// with their defaults; the scripts see them as extra inputs.
///

#[derive(Debug)]
pub struct Buff {
    pub id: Id,
    pub arguments: BTreeMap<String, f64>,
    pub on_start: Option<Script>,
    pub on_finish: Option<Script>,
    pub on_hit: Option<Script>,
    pub on_hurt: Option<Script>,
    pub on_tick: Option<Script>,
    pub name: String,
    pub icon: String,
}

impl Buff {
    pub fn new(local: &str, name: &str, icon: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            arguments: BTreeMap::new(),
            on_start: None,
            on_finish: None,
            on_hit: None,
            on_hurt: None,
            on_tick: None,
            name: name.to_string(),
            icon: icon.to_string(),
        })
    }

    #[must_use]
    pub fn argument(mut self, name: &str, default: f64) -> Self {
        self.arguments.insert(name.to_string(), default);
        self
    }

    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    fn script(&self, slot: &'static str, script: Option<&Script>) -> Result<Value, ValidateError> {
        script.map_or(Ok(Value::Null), |script| {
            script.serialize(&Self::here(slot))
        })
    }
}

impl Kind for Buff {
    const TYPE: &'static str = "Buff";
}

impl Record for Buff {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, _: &FrozenRegistry) -> Result<Value, ValidateError> {
        let path = Self::here("arguments");
        let arguments = require(expect_mapping(&self.arguments, &path, Rule::new())?, &path, "a Mapping")?;
        for value in arguments.values() {
            expect_float(value, &path.value(), Rule::new())?;
        }

        Ok(self
            .header()
            .with("arguments", arguments)
            .with("on_start", self.script("on_start", self.on_start.as_ref())?)
            .with("on_finish", self.script("on_finish", self.on_finish.as_ref())?)
            .with("on_hit", self.script("on_hit", self.on_hit.as_ref())?)
            .with("on_hurt", self.script("on_hurt", self.on_hurt.as_ref())?)
            .with("on_tick", self.script("on_tick", self.on_tick.as_ref())?)
            .with("name", expect_string(&self.name, &Self::here("name"), Rule::new())?)
            .with("icon", expect_string(&self.icon, &Self::here("icon"), Rule::new())?)
            .finish())
    }
}

/// Per-level argument overrides for `buff`: exactly `len` mappings whose
/// keys are declared arguments of the buff and whose values are numbers.
pub fn expect_args_list<D: Declared + ?Sized>(
    value: &D,
    len: usize,
    buff: &Buff,
    path: &FieldPath,
) -> Result<Option<Vec<Value>>, ValidateError> {
    expect_fixed_length_sequence(value, len, path, Rule::new(), |item, item_path| {
        let args = require(
            expect_mapping(&item, item_path, Rule::new())?,
            item_path,
            "a Mapping",
        )?;

        for (arg, value) in &args {
            if !buff.has_argument(arg) {
                return Err(ValidateError::invalid(
                    &item_path.key(),
                    format!("'{arg}' must be an argument in {}", buff.id),
                ));
            }
            expect_float(value, &item_path.value(), Rule::new())?;
        }

        Ok(Value::Object(args))
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::TickScript;
    use serde_json::json;

    fn burn() -> Buff {
        Buff::new("burn", "Burn", "icons/burn.png")
            .unwrap()
            .argument("damage", 5.0)
            .argument("duration", 3.0)
    }

    #[test]
    fn serializes_scripts_when_present() {
        let mut buff = burn();
        buff.on_tick = Some(Script::Tick(TickScript::new("target.hp -= damage")));

        let reg = Registry::new().freeze();
        let value = buff.serialize(&reg).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "Buff.burn",
                "arguments": {"damage": 5.0, "duration": 3.0},
                "on_tick": {
                    "type": "TickScript",
                    "script": "target.hp -= damage",
                    "delay": 0,
                    "interval": 1,
                    "times": 1
                },
                "name": "Burn",
                "icon": "icons/burn.png"
            })
        );
    }

    #[test]
    fn args_list_checks_declared_arguments() {
        let buff = burn();
        let path = FieldPath::at("Equipment", "values").value();

        let list = expect_args_list(&json!([{}, {"damage": 7}]), 2, &buff, &path).unwrap();
        assert_eq!(list, Some(vec![json!({}), json!({"damage": 7})]));

        let err = expect_args_list(&json!([{"range": 1}]), 1, &buff, &path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Equipment ~ values.(value).(item).(key) => 'range' must be an argument in Buff.burn"
        );

        let err = expect_args_list(&json!([{"damage": "hot"}]), 1, &buff, &path).unwrap_err();
        assert_eq!(err.path, "Equipment ~ values.(value).(item).(value)");

        let err = expect_args_list(&json!([{}]), 2, &buff, &path).unwrap_err();
        assert_eq!(err.class(), ValidateClass::Shape);
    }
}
