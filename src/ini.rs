//! INI source parser.
//!
//! Turns the text of a `conf.ini` into a [`RawConfig`]: section name to key
//! to untyped value, both levels in source order. The dialect:
//!
//! - `[section]` headers, name kept exactly as written. A bare header
//!   registers an empty section, so deliberately-empty sections still count
//!   as present during validation.
//! - `key = value` pairs, split on the first `=`. Values may be wrapped in
//!   double quotes; one layer of quotes is stripped.
//! - `;` and `#` start comments, full-line or inline. Inline comments are
//!   only recognized outside double quotes, so quoted values can carry both
//!   characters (security headers routinely do).
//! - `key[] = v` appends to a list, `key[sub] = v` inserts into a map.
//! - Lines that fit none of the above are skipped, as are keys appearing
//!   before the first section header. A file of garbage parses to an empty
//!   config; whether that is an error is the resolver's call, not ours.

use indexmap::IndexMap;

use crate::value::{RawConfig, RawSection, RawValue};

/// Parse INI text into a raw section tree. Never fails; unusable lines are
/// dropped.
pub fn parse(text: &str) -> RawConfig {
    let mut config = RawConfig::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        let body = strip_inline_comment(trimmed).trim_end();
        if body.is_empty() {
            continue;
        }

        if body.starts_with('[') && body.ends_with(']') {
            let name = body[1..body.len() - 1].trim().to_string();
            config.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some(section) = &current else {
            continue;
        };
        let Some(eq) = body.find('=') else {
            continue;
        };

        let key = body[..eq].trim_end();
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes(body[eq + 1..].trim()).to_string();

        if let Some(entry) = config.get_mut(section) {
            insert_value(entry, key, value);
        }
    }

    config
}

/// Store a parsed value under `key`, honoring the `[]` and `[sub]` suffixes.
///
/// A plain assignment replaces whatever was there before. List and map
/// assignments extend an existing value of the same shape and otherwise
/// start a fresh one.
fn insert_value(section: &mut RawSection, key: &str, value: String) {
    if let Some(base) = key.strip_suffix("[]") {
        let base = base.trim_end();
        match section.get_mut(base) {
            Some(RawValue::List(items)) => items.push(value),
            _ => {
                section.insert(base.to_string(), RawValue::List(vec![value]));
            }
        }
        return;
    }

    if let Some(open) = key.find('[')
        && let Some(sub) = key[open + 1..].strip_suffix(']')
    {
        let base = key[..open].trim_end();
        let sub = sub.trim();
        match section.get_mut(base) {
            Some(RawValue::Map(map)) => {
                map.insert(sub.to_string(), value);
            }
            _ => {
                let mut map = IndexMap::new();
                map.insert(sub.to_string(), value);
                section.insert(base.to_string(), RawValue::Map(map));
            }
        }
        return;
    }

    section.insert(key.to_string(), RawValue::Str(value));
}

/// Cut the line at the first `;` or `#` that sits outside double quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' | '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Strip one layer of surrounding double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
