//! Lowering - Node Model → q source text
//!
//! ## Architecture
//!
//! ```text
//! Module
//!   ↓ Translator (selects top-level FunctionDef, rayon)
//! Control-Construct Translator (statements.rs)
//!   ↓ nested bodies              ↓ scalar sub-expressions
//! Statement Sequencer          Expression Lowering Engine
//!   (sequencer.rs)               (expression.rs)
//!
//! Fixpoint Closure Analyzer (closure.rs): once per FixpointIterate block
//! ```
//!
//! ## Key Principles
//!
//! 1. **Pure**: every call receives its own `TranslationContext` and returns an
//!    owned string; nothing is shared between sibling calls.
//! 2. **Minimal parentheses**: source groups left-to-right, q groups
//!    right-to-left; only the groupings that disagree get parentheses.
//! 3. **Fail fast on malformed trees**, degrade gracefully on unsupported ones.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{FunctionTranslation, ModuleTranslation, Translator};

pub use domain::{ClosingBracket, OperatorContext, OperatorInfo, TranslationContext};
pub use infrastructure::{analyze_closure_variables, QLowerer};
