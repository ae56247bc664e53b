//! Switch encoding for the 7-Zip command line.
//!
//! A [`Switches`] bag maps switch names to values and keeps insertion order.
//! [`encode`] turns it into the flag tokens appended to the argument vector:
//!
//! - `true` emits `-<key>`, `false` emits nothing
//! - a string emits `-<key><value>`, double-quoted when the value has a space
//! - a string list emits one `-<key><item>` per item
//! - `raw` items are appended verbatim (repeatable flags such as `-i!*.jpg`)
//! - `wildcards` items are moved in front of every other flag
//! - `ssc` always emits either `-ssc` or `-ssc-`
//!
//! `so`, `spl` and `ssw` default to off, `ssc` and `y` default to on.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal flags appended as-is.
pub const RAW: &str = "raw";
/// Patterns placed before every other flag.
pub const WILDCARDS: &str = "wildcards";
/// Selection consumed by the command composer for "extract only" commands.
pub const FILES: &str = "files";

const DEFAULT_OFF: [&str; 3] = ["so", "spl", "ssw"];
const DEFAULT_ON: [&str; 2] = ["ssc", "y"];

/// Value of a single switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwitchValue {
    Flag(bool),
    Value(String),
    List(Vec<String>),
}

impl SwitchValue {
    fn is_flag(&self, expected: bool) -> bool {
        matches!(self, SwitchValue::Flag(b) if *b == expected)
    }

    /// Items of a value, flattening the single-string form.
    pub fn items(&self) -> Vec<String> {
        match self {
            SwitchValue::Flag(_) => Vec::new(),
            SwitchValue::Value(v) => vec![v.clone()],
            SwitchValue::List(items) => items.clone(),
        }
    }
}

impl From<bool> for SwitchValue {
    fn from(b: bool) -> Self {
        SwitchValue::Flag(b)
    }
}

impl From<&str> for SwitchValue {
    fn from(s: &str) -> Self {
        SwitchValue::Value(s.to_string())
    }
}

impl From<String> for SwitchValue {
    fn from(s: String) -> Self {
        SwitchValue::Value(s)
    }
}

impl From<Vec<String>> for SwitchValue {
    fn from(items: Vec<String>) -> Self {
        SwitchValue::List(items)
    }
}

impl From<Vec<&str>> for SwitchValue {
    fn from(items: Vec<&str>) -> Self {
        SwitchValue::List(items.into_iter().map(String::from).collect())
    }
}

/// Insertion-ordered switch bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Switches {
    entries: Vec<(String, SwitchValue)>,
}

impl Switches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Switches::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SwitchValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a switch. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SwitchValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SwitchValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a switch and return its value.
    pub fn remove(&mut self, key: &str) -> Option<SwitchValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SwitchValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inject the defaultable boolean switches so their effect is always
    /// emitted, whatever the caller omitted.
    fn with_defaults(&self) -> Switches {
        let mut switches = self.clone();
        for key in DEFAULT_OFF {
            if !switches.get(key).is_some_and(|v| v.is_flag(true)) {
                switches.set(key, false);
            }
        }
        for key in DEFAULT_ON {
            if !switches.get(key).is_some_and(|v| v.is_flag(false)) {
                switches.set(key, true);
            }
        }
        switches
    }
}

impl<K, V> FromIterator<(K, V)> for Switches
where
    K: Into<String>,
    V: Into<SwitchValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut switches = Switches::new();
        for (k, v) in iter {
            switches.set(k, v);
        }
        switches
    }
}

impl Serialize for Switches {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Switches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SwitchesVisitor;

        impl<'de> Visitor<'de> for SwitchesVisitor {
            type Value = Switches;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of switch names to booleans, strings or string lists")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Switches, A::Error> {
                let mut switches = Switches::new();
                while let Some((key, value)) = map.next_entry::<String, SwitchValue>()? {
                    switches.set(key, value);
                }
                Ok(switches)
            }
        }

        deserializer.deserialize_map(SwitchesVisitor)
    }
}

fn quote_if_spaced(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Transform a switch bag into the flag tokens passed to the tool.
pub fn encode(switches: &Switches) -> Vec<String> {
    let switches = switches.with_defaults();
    let mut front: Vec<String> = Vec::new();
    let mut flags: Vec<String> = Vec::new();

    for (key, value) in switches.iter() {
        match key {
            "ssc" => flags.push(if value.is_flag(true) { "-ssc" } else { "-ssc-" }.to_string()),
            WILDCARDS => front.extend(value.items()),
            RAW => flags.extend(value.items()),
            _ => match value {
                SwitchValue::Flag(true) => flags.push(format!("-{}", key)),
                SwitchValue::Flag(false) => {}
                SwitchValue::Value(v) => flags.push(format!("-{}{}", key, quote_if_spaced(v))),
                SwitchValue::List(items) => flags.extend(
                    items
                        .iter()
                        .map(|item| format!("-{}{}", key, quote_if_spaced(item))),
                ),
            },
        }
    }

    front.extend(flags);
    front
}
