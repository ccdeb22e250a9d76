//! Core resolution pipeline: merge the parsed source against the default
//! tree and produce the final section map.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Validate mandatory sections (only when a source file was found)
//! 2. Merge each default section in tree order, swapping in the backend
//!    skeleton for `model_options` when `model.class` names one
//! 3. Apply the expire-default and basepath fixups
//!
//! Resolution succeeds or fails as a whole; a partial tree is never handed
//! out.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::backend::Backend;
use crate::defaults::{self, MANDATORY_SECTIONS};
use crate::error::ConfigError;
use crate::i18n::Translate;
use crate::merge;
use crate::value::{RawConfig, Section, Value};

/// All pre-loaded data needed to resolve a configuration. No I/O happens here.
pub struct ResolveInput {
    /// Parsed source sections, or `None` when no source file was found.
    /// `Some` with no sections means a file was found but yielded nothing;
    /// that still counts as a loaded source for validation purposes.
    pub raw: Option<RawConfig>,
    /// Install root, prepended to relative `dir` defaults and the default
    /// database path.
    pub root: PathBuf,
    /// Raw environment pairs (pass `std::env::vars().collect()` or synthetic
    /// data).
    pub env_vars: Vec<(String, String)>,
}

impl ResolveInput {
    /// Look a variable up in the snapshot. Empty values count as unset; with
    /// duplicate names the last pair wins.
    pub fn env(&self, name: &str) -> Option<&str> {
        self.env_vars
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// Resolve the full section tree from pre-loaded inputs.
///
/// A found source must contain `main`, `model` and `model_options`, even if
/// empty. Sections are merged in default-tree order (see
/// [`merge`](crate::merge) for the per-section policy); `model` resolves
/// before `model_options`, so the backend skeleton substitution can read the
/// already-resolved class name.
pub fn resolve(
    input: &ResolveInput,
    translator: &dyn Translate,
) -> Result<IndexMap<String, Section>, ConfigError> {
    if let Some(raw) = &input.raw {
        for name in MANDATORY_SECTIONS {
            if !raw.contains_key(name) {
                return Err(ConfigError::missing_section(name, translator));
            }
        }
    }

    let mut resolved: IndexMap<String, Section> = IndexMap::new();
    for (name, default_section) in defaults::defaults() {
        let raw_section = input.raw.as_ref().and_then(|raw| raw.get(name));

        // The skeleton replaces the defaults, never the raw values.
        let skeleton = if name == "model_options" {
            resolved
                .get("model")
                .and_then(|model| model.get("class"))
                .and_then(|class| class.as_str())
                .and_then(Backend::from_class)
                .map(|backend| backend.skeleton(input))
        } else {
            None
        };
        let effective_defaults = skeleton.as_ref().unwrap_or(default_section);

        let merged = merge::merge_section(name, effective_defaults, raw_section, &input.root);
        resolved.insert(name.clone(), merged);
    }

    apply_fixups(&mut resolved);
    Ok(resolved)
}

/// The two documented post-merge corrections. Policy, not error recovery:
/// neither ever fails.
fn apply_fixups(resolved: &mut IndexMap<String, Section>) {
    // expire.default must name one of the resolved expiry options; fall back
    // to the first option when it does not.
    let fallback = {
        let options = resolved.get("expire_options");
        let current = resolved
            .get("expire")
            .and_then(|expire| expire.get("default"))
            .and_then(|value| value.as_str());
        match (options, current) {
            (Some(options), Some(current)) if !options.contains_key(current) => {
                options.keys().next().cloned()
            }
            _ => None,
        }
    };
    if let Some(first_option) = fallback
        && let Some(expire) = resolved.get_mut("expire")
    {
        expire.insert("default".to_string(), Value::Str(first_option));
    }

    // a non-empty basepath ends in exactly one trailing slash
    if let Some(main) = resolved.get_mut("main")
        && let Some(Value::Str(basepath)) = main.get_mut("basepath")
        && !basepath.is_empty()
        && !basepath.ends_with('/')
    {
        basepath.push('/');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{input_from_ini, no_source_input, root};
    use crate::i18n::Identity;

    fn resolve_ini(text: &str) -> IndexMap<String, Section> {
        resolve(&input_from_ini(text), &Identity).unwrap()
    }

    #[test]
    fn no_source_yields_defaults_with_prefixed_dir() {
        let resolved = resolve(&no_source_input(), &Identity).unwrap();
        for (name, section) in defaults::defaults() {
            if name == "model_options" {
                continue;
            }
            assert_eq!(&resolved[name], section, "section [{name}] changed");
        }
        assert_eq!(
            resolved["model_options"]["dir"],
            Value::Str(root().join("data").display().to_string())
        );
    }

    #[test]
    fn no_source_skips_mandatory_validation() {
        assert!(resolve(&no_source_input(), &Identity).is_ok());
    }

    #[test]
    fn missing_mandatory_section_fails() {
        let input = input_from_ini("[main]\nname = x\n[model]\nclass = Filesystem\n");
        let err = resolve(&input, &Identity).unwrap_err();
        match err {
            ConfigError::MissingSection { section, message } => {
                assert_eq!(section, "model_options");
                assert!(message.contains("[model_options]"));
            }
            other => panic!("expected MissingSection, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_source_fails_on_first_mandatory_section() {
        // a garbage file parses to zero sections but still counts as loaded
        let err = resolve(&input_from_ini("not ini at all\n"), &Identity).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSection { section, .. } if section == "main"
        ));
    }

    #[test]
    fn empty_mandatory_sections_pass_validation() {
        let resolved = resolve_ini("[main]\n[model]\n[model_options]\n");
        assert_eq!(resolved["main"], defaults::defaults()["main"]);
    }

    #[test]
    fn raw_values_override_defaults() {
        let resolved = resolve_ini(
            "[main]\nname = My Bin\nqrcode = off\nsizelimit = 1024\n[model]\n[model_options]\n",
        );
        assert_eq!(resolved["main"]["name"], Value::Str("My Bin".into()));
        assert_eq!(resolved["main"]["qrcode"], Value::Bool(false));
        assert_eq!(resolved["main"]["sizelimit"], Value::Int(1024));
        // untouched keys fall through to defaults
        assert_eq!(resolved["main"]["template"], Value::Str("slate-dark".into()));
    }

    #[test]
    fn undeclared_raw_sections_dropped() {
        let resolved = resolve_ini("[main]\n[model]\n[model_options]\n[custom]\nx = 1\n");
        assert!(!resolved.contains_key("custom"));
        assert_eq!(resolved.len(), defaults::defaults().len());
    }

    // --- Backend skeleton substitution ---

    #[test]
    fn database_class_with_empty_options_yields_exact_skeleton() {
        let resolved = resolve_ini("[main]\n[model]\nclass = Database\n[model_options]\n");
        let options = &resolved["model_options"];
        let keys: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["dsn", "tbl", "usr", "pwd", "opt"]);
        assert_eq!(
            options["dsn"],
            Value::Str(format!(
                "sqlite:{}",
                root().join("data").join("db.sq3").display()
            ))
        );
        assert!(options["tbl"].is_null());
        assert!(options["usr"].is_null());
        assert!(options["pwd"].is_null());
        assert_eq!(options["opt"], Value::List(vec![]));
    }

    #[test]
    fn database_raw_values_win_over_skeleton() {
        let resolved = resolve_ini(
            "[main]\n[model]\nclass = Database\n[model_options]\ndsn = mysql:uds\nusr = driftbin\n",
        );
        let options = &resolved["model_options"];
        assert_eq!(options["dsn"], Value::Str("mysql:uds".into()));
        assert_eq!(options["usr"], Value::Str("driftbin".into()));
        assert!(options["pwd"].is_null());
    }

    #[test]
    fn gcs_bucket_seeded_from_environment() {
        let mut input =
            input_from_ini("[main]\n[model]\nclass = GoogleCloudStorage\n[model_options]\n");
        input
            .env_vars
            .push(("DRIFTBIN_GCS_BUCKET".to_string(), "paste-bucket".to_string()));
        let resolved = resolve(&input, &Identity).unwrap();
        let options = &resolved["model_options"];
        assert_eq!(options["bucket"], Value::Str("paste-bucket".into()));
        assert_eq!(options["prefix"], Value::Str("pastes".into()));
        assert_eq!(options["uniformacl"], Value::Bool(false));
    }

    #[test]
    fn gcs_bucket_null_without_environment() {
        let resolved = resolve_ini("[main]\n[model]\nclass = GoogleCloudStorage\n[model_options]\n");
        assert!(resolved["model_options"]["bucket"].is_null());
    }

    #[test]
    fn s3_class_yields_nullable_credential_fields() {
        let resolved = resolve_ini("[main]\n[model]\nclass = S3Storage\n[model_options]\n");
        let options = &resolved["model_options"];
        assert!(options["region"].is_null());
        assert!(options["accesskey"].is_null());
        assert_eq!(options["prefix"], Value::Str("".into()));
        assert!(!options.contains_key("dir"));
    }

    #[test]
    fn unknown_class_keeps_stock_defaults() {
        let resolved = resolve_ini("[main]\n[model]\nclass = Redis\n[model_options]\n");
        let options = &resolved["model_options"];
        assert_eq!(
            options["dir"],
            Value::Str(root().join("data").display().to_string())
        );
        assert!(!options.contains_key("dsn"));
    }

    #[test]
    fn class_match_is_case_sensitive() {
        let resolved = resolve_ini("[main]\n[model]\nclass = database\n[model_options]\n");
        assert!(resolved["model_options"].contains_key("dir"));
    }

    // --- Fixups ---

    #[test]
    fn bogus_expire_default_falls_back_to_first_option() {
        let resolved = resolve_ini(
            "[main]\n[model]\n[model_options]\n[expire]\ndefault = 2fortnights\n",
        );
        assert_eq!(resolved["expire"]["default"], Value::Str("5min".into()));
    }

    #[test]
    fn expire_fallback_uses_resolved_options_order() {
        let resolved = resolve_ini(
            "[main]\n[model]\n[model_options]\n[expire]\ndefault = gone\n[expire_options]\n90s = 90\n5min = 300\n",
        );
        assert_eq!(resolved["expire"]["default"], Value::Str("90s".into()));
    }

    #[test]
    fn valid_expire_default_untouched() {
        let resolved = resolve_ini("[main]\n[model]\n[model_options]\n[expire]\ndefault = 1hour\n");
        assert_eq!(resolved["expire"]["default"], Value::Str("1hour".into()));
    }

    #[test]
    fn custom_expire_options_validate_the_default() {
        // default 1week survives only if the redefined options still carry it
        let resolved =
            resolve_ini("[main]\n[model]\n[model_options]\n[expire_options]\n90s = 90\n");
        assert_eq!(resolved["expire"]["default"], Value::Str("90s".into()));
    }

    #[test]
    fn basepath_gains_trailing_slash() {
        let resolved = resolve_ini("[main]\nbasepath = /paste\n[model]\n[model_options]\n");
        assert_eq!(resolved["main"]["basepath"], Value::Str("/paste/".into()));
    }

    #[test]
    fn basepath_with_slash_unchanged() {
        let resolved = resolve_ini("[main]\nbasepath = /paste/\n[model]\n[model_options]\n");
        assert_eq!(resolved["main"]["basepath"], Value::Str("/paste/".into()));
    }

    #[test]
    fn empty_basepath_stays_empty() {
        let resolved = resolve_ini("[main]\nbasepath =\n[model]\n[model_options]\n");
        assert_eq!(resolved["main"]["basepath"], Value::Str("".into()));
    }

    // --- Determinism ---

    #[test]
    fn resolving_twice_is_identical_including_order() {
        let text = "[main]\nname = Twice\n[model]\nclass = Database\n[model_options]\ndsn = mysql:x\n[expire_options]\n90s = 90\n";
        let first = resolve_ini(text);
        let second = resolve_ini(text);
        assert_eq!(first, second);
        let first_keys: Vec<&String> = first.keys().collect();
        let second_keys: Vec<&String> = second.keys().collect();
        assert_eq!(first_keys, second_keys);
    }

    // --- Environment snapshot ---

    #[test]
    fn env_lookup_ignores_empty_values() {
        let mut input = no_source_input();
        input.env_vars.push(("EMPTY".to_string(), String::new()));
        input.env_vars.push(("SET".to_string(), "v".to_string()));
        assert_eq!(input.env("EMPTY"), None);
        assert_eq!(input.env("SET"), Some("v"));
        assert_eq!(input.env("ABSENT"), None);
    }

    #[test]
    fn env_lookup_last_pair_wins() {
        let mut input = no_source_input();
        input.env_vars.push(("X".to_string(), "first".to_string()));
        input.env_vars.push(("X".to_string(), "second".to_string()));
        assert_eq!(input.env("X"), Some("second"));
    }
}
