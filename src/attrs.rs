use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::AttributeMap;

/// Identifies the inference engine that produced a batch of samples.
pub trait InferenceEngine {
    fn name(&self) -> &str;

    /// The engine's self-reported version, consulted when no package
    /// registry resolves one.
    fn version(&self) -> Option<&str> {
        None
    }
}

/// Resolves the installed version of a package by name, the analogue of
/// asking the package manager.
pub trait VersionLookup {
    fn version_of(&self, package: &str) -> Option<String>;
}

/// Plain-value [`InferenceEngine`] implementor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub name: String,
    pub version: Option<String>,
}

impl EngineInfo {
    pub fn new<S: Into<String>>(name: S, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl InferenceEngine for EngineInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Make standard attributes to attach to a dataset.
///
/// Shorthand for [`make_attrs_with_lookup`] without a package registry.
pub fn make_attrs(attrs: Option<&AttributeMap>, engine: Option<&dyn InferenceEngine>) -> AttributeMap {
    make_attrs_with_lookup(attrs, engine, None)
}

/// Make standard attributes to attach to a dataset.
///
/// Always includes `created_at`, a fresh UTC timestamp in ISO-8601 form.
/// When `engine` is given, `inference_library` carries its name and
/// `inference_library_version` its version, resolved through `lookup` first
/// and the engine's own report second; the key is omitted when neither
/// resolves. Caller-supplied `attrs` are applied last and win on collision.
pub fn make_attrs_with_lookup(
    attrs: Option<&AttributeMap>,
    engine: Option<&dyn InferenceEngine>,
    lookup: Option<&dyn VersionLookup>,
) -> AttributeMap {
    let mut out = AttributeMap::new();
    out.insert(
        "created_at".to_string(),
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    if let Some(engine) = engine {
        out.insert(
            "inference_library".to_string(),
            Value::from(engine.name()),
        );
        let version = lookup
            .and_then(|registry| registry.version_of(engine.name()))
            .or_else(|| engine.version().map(str::to_string));
        if let Some(version) = version {
            out.insert("inference_library_version".to_string(), Value::from(version));
        }
    }
    if let Some(attrs) = attrs {
        for (key, value) in attrs {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    struct Registry;

    impl VersionLookup for Registry {
        fn version_of(&self, package: &str) -> Option<String> {
            (package == "stan").then(|| "2.24.0".to_string())
        }
    }

    #[test]
    fn test_defaults_only_created_at() {
        let attrs = make_attrs(None, None);
        assert_eq!(attrs.len(), 1);
        let stamp = attrs["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_registry_wins_over_engine_version() {
        let engine = EngineInfo::new("stan", Some("9.9.9".to_string()));
        let attrs = make_attrs_with_lookup(None, Some(&engine), Some(&Registry));
        assert_eq!(attrs["inference_library"], json!("stan"));
        assert_eq!(attrs["inference_library_version"], json!("2.24.0"));
    }

    #[test]
    fn test_engine_version_fallback() {
        let engine = EngineInfo::new("pymc3", Some("3.11.4".to_string()));
        let attrs = make_attrs_with_lookup(None, Some(&engine), Some(&Registry));
        assert_eq!(attrs["inference_library_version"], json!("3.11.4"));
    }

    #[test]
    fn test_version_omitted_when_unresolvable() {
        let engine = EngineInfo::new("turing", None);
        let attrs = make_attrs_with_lookup(None, Some(&engine), Some(&Registry));
        assert_eq!(attrs["inference_library"], json!("turing"));
        assert!(!attrs.contains_key("inference_library_version"));
    }

    #[test]
    fn test_caller_attrs_override_defaults() {
        let mut extra = AttributeMap::new();
        extra.insert("created_at".to_string(), json!("override"));
        extra.insert("note".to_string(), json!("eight schools"));
        let attrs = make_attrs(Some(&extra), None);
        assert_eq!(attrs["created_at"], json!("override"));
        assert_eq!(attrs["note"], json!("eight schools"));
    }
}
