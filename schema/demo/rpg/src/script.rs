use respack::prelude::*;

/// Every script variant. `Script` itself is abstract.
pub const SCRIPTS: VariantSet = VariantSet::new(
    "Script",
    &["BuildScript", "HitScript", "HurtScript", "HealScript", "TickScript"],
);

///
/// Script
///
/// Runtime hook attached to buffs and equipment. The script body is opaque
/// here; only its shape is checked.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Script {
    Build { script: String },
    Hit { script: String },
    Hurt { script: String },
    Heal { script: String },
    Tick(TickScript),
}

impl Script {
    #[must_use]
    pub fn build(script: &str) -> Self {
        Self::Build {
            script: script.to_string(),
        }
    }

    #[must_use]
    pub fn hit(script: &str) -> Self {
        Self::Hit {
            script: script.to_string(),
        }
    }

    #[must_use]
    pub fn hurt(script: &str) -> Self {
        Self::Hurt {
            script: script.to_string(),
        }
    }

    #[must_use]
    pub fn heal(script: &str) -> Self {
        Self::Heal {
            script: script.to_string(),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Build { .. } => "BuildScript",
            Self::Hit { .. } => "HitScript",
            Self::Hurt { .. } => "HurtScript",
            Self::Heal { .. } => "HealScript",
            Self::Tick(_) => "TickScript",
        }
    }

    /// Parse a loosely declared script mapping keyed by `"type"`.
    pub fn from_value(value: &Value, path: &FieldPath) -> Result<Self, ValidateError> {
        let tag = SCRIPTS.tag_of(value, path)?;

        let script_path = path.field("script");
        let script = require(
            expect_string(&value.get("script"), &script_path, Rule::new())?,
            &script_path,
            "a str",
        )?;

        let script = match tag {
            "BuildScript" => Self::Build { script },
            "HitScript" => Self::Hit { script },
            "HurtScript" => Self::Hurt { script },
            "HealScript" => Self::Heal { script },
            _ => {
                let defaults = TickScript::new(&script);
                let count = |key: &'static str, default: i64| {
                    expect_int(&value.get(key), &path.field(key), Rule::new().optional().min(0))
                        .map(|n| n.unwrap_or(default))
                };

                Self::Tick(TickScript {
                    script,
                    delay: count("delay", defaults.delay)?,
                    interval: count("interval", defaults.interval)?,
                    times: count("times", defaults.times)?,
                })
            }
        };

        Ok(script)
    }

    pub fn serialize(&self, path: &FieldPath) -> Result<Value, ValidateError> {
        let fields = match self {
            Self::Build { script }
            | Self::Hit { script }
            | Self::Hurt { script }
            | Self::Heal { script } => FieldMap::new().with(
                "script",
                expect_string(script, &path.field("script"), Rule::new())?,
            ),
            Self::Tick(tick) => tick.fields(path)?,
        };

        Ok(tagged(self.tag(), fields).finish())
    }
}

///
/// TickScript
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickScript {
    pub script: String,
    pub delay: i64,
    pub interval: i64,
    pub times: i64,
}

impl TickScript {
    #[must_use]
    pub fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
            delay: 0,
            interval: 1,
            times: 1,
        }
    }

    fn fields(&self, path: &FieldPath) -> Result<FieldMap, ValidateError> {
        let count = Rule::new().min(0);

        Ok(FieldMap::new()
            .with("script", expect_string(&self.script, &path.field("script"), Rule::new())?)
            .with("delay", expect_int(&self.delay, &path.field("delay"), count)?)
            .with("interval", expect_int(&self.interval, &path.field("interval"), count)?)
            .with("times", expect_int(&self.times, &path.field("times"), count)?))
    }
}

///
/// TESTS
///
