//! Settings model: tagged values in input order.
//!
//! A settings mapping arrives as a JSON object.  Each entry is converted into
//! a [`Setting`] whose value is one of the three supported kinds; anything
//! else is rejected up front so the serializer can match exhaustively.
use serde_json::{Map, Value};

use crate::error::SettingsError;

/// The reserved setting name that selects a colorscheme.
pub const THEME_KEY: &str = "theme";

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// `true` / `false`.
    Boolean(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A string.
    Text(String),
}

impl SettingValue {
    /// Convert a JSON value, naming the setting in any error.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnsupportedValue`] for null, floats, arrays,
    /// objects and integers outside the `i64` range.
    pub fn from_json(name: &str, value: &Value) -> Result<Self, SettingsError> {
        match value {
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Integer).ok_or_else(|| {
                SettingsError::UnsupportedValue {
                    name: name.to_string(),
                    kind: if n.is_f64() { "float" } else { "integer out of range" },
                }
            }),
            other => Err(SettingsError::UnsupportedValue {
                name: name.to_string(),
                kind: json_kind(other),
            }),
        }
    }
}

/// What a setting does once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingRole {
    /// Activates a colorscheme.
    Colorscheme,
    /// Assigns an editor option of the same name.
    Option,
}

impl SettingRole {
    /// Classify a setting by name.  `theme` is the only reserved name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name == THEME_KEY {
            Self::Colorscheme
        } else {
            Self::Option
        }
    }
}

/// One named setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Option name, used unchanged.
    pub name: String,
    /// Desired value.
    pub value: SettingValue,
}

impl Setting {
    /// Role of this setting, derived from its name.
    #[must_use]
    pub fn role(&self) -> SettingRole {
        SettingRole::of(&self.name)
    }
}

/// An ordered settings mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<Setting>,
}

impl Settings {
    /// Build settings from `(name, value)` pairs, keeping their order.
    #[must_use]
    pub const fn new(entries: Vec<Setting>) -> Self {
        Self { entries }
    }

    /// Convert a JSON object, preserving key order.
    ///
    /// # Errors
    ///
    /// Returns an error if any value has an unsupported kind.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, SettingsError> {
        map.iter()
            .map(|(name, value)| {
                Ok(Setting {
                    name: name.clone(),
                    value: SettingValue::from_json(name, value)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Convert the `settings` argument of a request.  `None` and `null` yield
    /// an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or contains an
    /// unsupported value.
    pub fn from_arg(value: Option<&Value>) -> Result<Self, SettingsError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Self::from_map(map),
            Some(other) => Err(SettingsError::NotAnObject(json_kind(other))),
        }
    }

    /// Iterate settings in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }

    /// Number of settings.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Short name of a JSON value's kind, for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
