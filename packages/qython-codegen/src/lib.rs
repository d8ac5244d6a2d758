/*
 * Qython Codegen - Qython → q source-to-source translator
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Node Model (SyntaxNode, SyntaxView port)
 * - features/    : Vertical slices (parsing → lowering)
 * - config/      : Translator configuration (YAML v1)
 *
 * The lowering pass is a pure recursive descent over an immutable tree.
 * Top-level functions are independent and translate on the rayon pool.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and ports
pub mod shared;

/// Feature modules (parsing, lowering)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, TranslatorConfig};
pub use errors::{Result, TranslateError};
pub use features::lowering::{FunctionTranslation, ModuleTranslation, Translator};
pub use features::parsing::{DialectPreprocessor, SourceParser, TreeSitterParser};
pub use shared::models::{NodeKind, SyntaxNode};
pub use shared::ports::SyntaxView;
