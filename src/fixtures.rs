#[cfg(test)]
pub mod test {
    use std::path::PathBuf;

    use crate::builder::Loader;
    use crate::config::Config;
    use crate::ini;
    use crate::resolve::ResolveInput;
    use crate::value::{RawSection, RawValue};

    /// The smallest source that passes mandatory-section validation.
    pub const MINIMAL_INI: &str = "[main]\n[model]\n[model_options]\n";

    /// A fixed install root. Purely symbolic: nothing in the pipeline reads
    /// it from disk, it only gets prepended to `dir` defaults and the
    /// default database path.
    pub fn root() -> PathBuf {
        PathBuf::from("/srv/driftbin")
    }

    /// A raw section from string pairs, in the given order.
    pub fn raw_section(pairs: &[(&str, &str)]) -> RawSection {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), RawValue::Str(value.to_string())))
            .collect()
    }

    /// Resolution input for the "no source file found" case, with an empty
    /// environment snapshot.
    pub fn no_source_input() -> ResolveInput {
        ResolveInput {
            raw: None,
            root: root(),
            env_vars: vec![],
        }
    }

    /// Resolution input from INI text, with an empty environment snapshot.
    pub fn input_from_ini(text: &str) -> ResolveInput {
        ResolveInput {
            raw: Some(ini::parse(text)),
            root: root(),
            env_vars: vec![],
        }
    }

    /// A hermetic `Config` resolved from pure defaults.
    pub fn config_defaults() -> Config {
        Loader::new(root())
            .env_vars(vec![])
            .from_raw(None)
            .expect("defaults always resolve")
    }

    /// A hermetic `Config` resolved from INI text.
    pub fn config_from_ini(text: &str) -> Config {
        Loader::new(root())
            .env_vars(vec![])
            .from_raw(Some(ini::parse(text)))
            .expect("fixture source should resolve")
    }
}
