//! Translator Configuration
//!
//! Two levels:
//! - Level 1: `TranslatorConfig::default()` - the layout q scripts expect
//! - Level 2: YAML (schema v1) for teams that want a different layout
//!
//! # Examples
//!
//! ```rust,ignore
//! use qython_codegen::config::TranslatorConfig;
//!
//! // Level 1: defaults
//! let config = TranslatorConfig::default();
//!
//! // Builder override
//! let config = TranslatorConfig::default().indent_width(2).parallel(false);
//!
//! // Level 2: YAML
//! let config = TranslatorConfig::from_yaml("qython.yaml")?;
//! ```

pub mod error;
pub mod translator_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use translator_config::{ConfigFileV1, TranslatorConfig, SUPPORTED_VERSIONS};
pub use validation::Validatable;
