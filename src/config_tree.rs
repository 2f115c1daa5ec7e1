//! JSON configuration tree shared with the host.
//!
//! Every usermod owns one named section directly under the root. Export
//! replaces that section wholesale; import reads it field by field and reports
//! whether everything was there.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ConfigRoot = Map<String, Value>;

/// Section body common to both status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLedConfig {
    pub enabled: bool,
    pub pin: i8,
    pub inverted: bool,
}

impl StatusLedConfig {
    /// Writes this config as section `name`, replacing any previous content.
    pub fn export(&self, root: &mut ConfigRoot, name: &str) {
        match serde_json::to_value(self) {
            Ok(section) => {
                root.insert(name.to_owned(), section);
            }
            Err(err) => log::error!("Failed to encode section {}: {}", name, err),
        }
    }

    /// Updates fields in place from section `name`.
    ///
    /// Returns `true` only when the section exists and all three fields parsed.
    /// Fields that did parse are kept even when the result is `false`.
    pub fn import(&mut self, root: &ConfigRoot, name: &str) -> bool {
        let section = root.get(name).and_then(Value::as_object);
        if section.is_none() {
            log::debug!("Config section {} missing", name);
        }
        let field = |key: &str| section.and_then(|s| s.get(key));

        let mut complete = section.is_some();
        complete &= get_json_value(field("enabled"), &mut self.enabled);
        complete &= get_json_value(field("pin"), &mut self.pin);
        complete &= get_json_value(field("inverted"), &mut self.inverted);
        complete
    }
}

/// Assigns `element` to `destination` if present and of the right type.
///
/// A missing, `null` or mistyped element leaves `destination` untouched.
pub fn get_json_value<T: DeserializeOwned>(element: Option<&Value>, destination: &mut T) -> bool {
    let Some(element) = element.filter(|v| !v.is_null()) else {
        return false;
    };
    match T::deserialize(element) {
        Ok(value) => {
            *destination = value;
            true
        }
        Err(err) => {
            log::debug!("Ignoring config value {}: {}", element, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root(value: Value) -> ConfigRoot {
        match value {
            Value::Object(map) => map,
            _ => panic!("config root must be an object"),
        }
    }

    #[test]
    fn get_json_value_rejects_null_and_mistyped() {
        let mut pin: i8 = 3;
        assert!(!get_json_value(None, &mut pin));
        assert!(!get_json_value(Some(&Value::Null), &mut pin));
        assert!(!get_json_value(Some(&json!("five")), &mut pin));
        assert!(!get_json_value(Some(&json!(300)), &mut pin));
        assert_eq!(pin, 3);
        assert!(get_json_value(Some(&json!(-1)), &mut pin));
        assert_eq!(pin, -1);
    }

    #[test]
    fn export_replaces_section() {
        let mut tree = root(json!({ "Boot Status LED": { "stale": 1 }, "other": true }));
        let config = StatusLedConfig {
            enabled: false,
            pin: 12,
            inverted: true,
        };
        config.export(&mut tree, "Boot Status LED");
        assert_eq!(
            tree["Boot Status LED"],
            json!({ "enabled": false, "pin": 12, "inverted": true })
        );
        assert_eq!(tree["other"], json!(true));
    }

    #[test]
    fn import_keeps_parsed_fields_on_partial_section() {
        let tree = root(json!({ "LED": { "enabled": false, "inverted": "yes" } }));
        let mut config = StatusLedConfig {
            enabled: true,
            pin: 4,
            inverted: true,
        };
        assert!(!config.import(&tree, "LED"));
        assert_eq!(
            config,
            StatusLedConfig {
                enabled: false,
                pin: 4,
                inverted: true
            }
        );
    }

    #[test]
    fn import_fails_when_section_is_not_an_object() {
        let tree = root(json!({ "LED": 5 }));
        let mut config = StatusLedConfig {
            enabled: true,
            pin: 4,
            inverted: false,
        };
        assert!(!config.import(&tree, "LED"));
        assert_eq!(config.pin, 4);
    }
}
