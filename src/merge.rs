//! Per-section merge policy.
//!
//! Each section merges by one of four rules, picked from its name and the
//! shape of the raw entry:
//!
//! 1. Raw entry absent or empty: the defaults verbatim, except a key named
//!    `dir` gets the install root prepended.
//! 2. Name ends in `_options`, except `model_options` (free-form): the raw
//!    entry wholesale, coercing every value to an integer when the first
//!    default value is one. Administrators can redefine these sections
//!    completely, unknown keys included.
//! 3. `sri`: the raw entry wholesale, untyped. Configured integrity hashes
//!    are never mixed with defaults.
//! 4. Anything else (fixed schema): key-by-key over the defaults, coercing
//!    raw values to each default's type. Raw keys the defaults do not
//!    declare are dropped.

use std::path::Path;

use crate::value::{self, RawSection, Section, Value};

/// Merge one section. `defaults` is the section's default table, already
/// swapped for a backend skeleton where that applies.
pub(crate) fn merge_section(
    name: &str,
    defaults: &Section,
    raw: Option<&RawSection>,
    root: &Path,
) -> Section {
    let Some(raw_section) = raw.filter(|section| !section.is_empty()) else {
        let mut merged = defaults.clone();
        if let Some(Value::Str(dir)) = merged.get("dir") {
            let prefixed = prefix_dir(root, dir);
            merged.insert("dir".to_string(), Value::Str(prefixed));
        }
        return merged;
    };

    if name != "model_options" && name.ends_with("_options") {
        let int_mode = matches!(defaults.values().next(), Some(Value::Int(_)));
        return raw_section
            .iter()
            .map(|(key, raw_value)| {
                let value = if int_mode {
                    Value::Int(value::loose_int(raw_value))
                } else {
                    value::coerce(&Value::Null, raw_value)
                };
                (key.clone(), value)
            })
            .collect();
    }

    if name == "sri" {
        return raw_section
            .iter()
            .map(|(key, raw_value)| (key.clone(), value::coerce(&Value::Null, raw_value)))
            .collect();
    }

    let mut merged = Section::new();
    for (key, default) in defaults {
        let default = if key == "dir" {
            match default {
                Value::Str(dir) => Value::Str(prefix_dir(root, dir)),
                other => other.clone(),
            }
        } else {
            default.clone()
        };
        let resolved = match raw_section.get(key) {
            Some(raw_value) => value::coerce(&default, raw_value),
            None => default,
        };
        merged.insert(key.clone(), resolved);
    }
    merged
}

// Directory defaults are expressed relative to the install root.
fn prefix_dir(root: &Path, dir: &str) -> String {
    root.join(dir).display().to_string()
}
