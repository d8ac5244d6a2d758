//! Translator configuration and its YAML schema (v1)

use super::error::{ConfigError, ConfigResult};
use super::validation::{is_identifier, Validatable};
use serde::{Deserialize, Serialize};

/// Configuration schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

const MIN_INDENT_WIDTH: usize = 1;
const MAX_INDENT_WIDTH: usize = 8;

/// Settings for one translation run
///
/// Layout knobs only. The operator table is fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorConfig {
    /// Spaces per nesting level
    pub indent_width: usize,

    /// Emit single one-line bodies inline (`f:{[x] :x+1}`)
    pub inline_single_statement: bool,

    /// Text placed between translated functions when a module is rendered
    pub function_separator: String,

    /// Translate top-level functions on the rayon pool
    pub parallel: bool,

    /// Name of the two-argument fixpoint builtin (`converge(step, starting_from=x)`)
    pub fixpoint_builtin: String,

    /// Keyword naming the initial value of the fixpoint builtin
    pub fixpoint_keyword: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            inline_single_statement: true,
            function_separator: "\n\n".to_string(),
            parallel: true,
            fixpoint_builtin: "converge".to_string(),
            fixpoint_keyword: "starting_from".to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn inline_single_statement(mut self, inline: bool) -> Self {
        self.inline_single_statement = inline;
        self
    }

    pub fn function_separator(mut self, separator: impl Into<String>) -> Self {
        self.function_separator = separator.into();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Indentation string for a nesting depth
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = file.translator.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            translator: Some(self.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}

impl Validatable for TranslatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(MIN_INDENT_WIDTH..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            return Err(ConfigError::range_with_hint(
                "indent_width",
                self.indent_width,
                MIN_INDENT_WIDTH,
                MAX_INDENT_WIDTH,
                "Continuation lines of a q definition must be indented",
            ));
        }
        if !is_identifier(&self.fixpoint_builtin) {
            return Err(ConfigError::invalid(
                "fixpoint_builtin",
                format!("'{}' is not an identifier", self.fixpoint_builtin),
            ));
        }
        if !is_identifier(&self.fixpoint_keyword) {
            return Err(ConfigError::invalid(
                "fixpoint_keyword",
                format!("'{}' is not an identifier", self.fixpoint_keyword),
            ));
        }
        Ok(())
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Translator settings; omitted fields keep their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator: Option<TranslatorConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.indent(2), "        ");
    }

    #[test]
    fn test_builder_overrides() {
        let config = TranslatorConfig::default()
            .indent_width(2)
            .inline_single_statement(false)
            .parallel(false);
        assert_eq!(config.indent(1), "  ");
        assert!(!config.inline_single_statement);
        assert!(!config.parallel);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TranslatorConfig::default().indent_width(2);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("indent_width: 2"));

        let loaded = TranslatorConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
version: 1
translator:
  indent_width: 2
  parallel: false
"#;
        let config = TranslatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.indent_width, 2);
        assert!(!config.parallel);
        assert_eq!(config.fixpoint_builtin, "converge");
    }

    #[test]
    fn test_yaml_loading_from_file() {
        let yaml_content = r#"
version: 1
translator:
  fixpoint_builtin: fixpoint
  fixpoint_keyword: init
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();
        let path = temp_file.path().to_str().unwrap();

        let config = TranslatorConfig::from_yaml(path).unwrap();
        assert_eq!(config.fixpoint_builtin, "fixpoint");
        assert_eq!(config.fixpoint_keyword, "init");
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = TranslatorConfig::from_yaml_str("translator:\n  indent_width: 2\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = TranslatorConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = TranslatorConfig::from_yaml_str("version: 1\ntranslator:\n  tabs: true\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_indent_width_range() {
        let err = TranslatorConfig::default().indent_width(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));

        let err = TranslatorConfig::default().indent_width(9).validate().unwrap_err();
        assert!(err.to_string().contains("indent_width"));
    }

    #[test]
    fn test_fixpoint_names_must_be_identifiers() {
        let mut config = TranslatorConfig::default();
        config.fixpoint_keyword = "starting from".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
