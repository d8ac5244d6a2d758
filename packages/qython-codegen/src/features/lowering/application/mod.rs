//! Lowering application layer - module/function driver

mod translator;

pub use translator::{FunctionTranslation, ModuleTranslation, Translator};
