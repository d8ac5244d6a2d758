//! Translator - module driver
//!
//! Selects the top-level function definitions of a module, lowers each one
//! independently and joins the results. A function that fails to translate
//! never affects its siblings.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{TranslatorConfig, Validatable};
use crate::errors::Result;
use crate::features::lowering::domain::TranslationContext;
use crate::features::lowering::infrastructure::QLowerer;
use crate::features::parsing::{SourceParser, TreeSitterParser};
use crate::shared::models::NodeKind;
use crate::shared::ports::SyntaxView;

const UNNAMED_FUNCTION: &str = "<unnamed>";

/// Result of translating one top-level function
#[derive(Debug)]
pub struct FunctionTranslation {
    pub name: String,
    pub output: Result<String>,
}

impl FunctionTranslation {
    pub fn is_ok(&self) -> bool {
        self.output.is_ok()
    }
}

/// Per-function results of a module, in source order
#[derive(Debug)]
pub struct ModuleTranslation {
    pub functions: Vec<FunctionTranslation>,
    separator: String,
}

impl ModuleTranslation {
    /// Keep only the function called `name`
    pub fn select(mut self, name: &str) -> Self {
        self.functions.retain(|f| f.name == name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FunctionTranslation> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Functions whose translation failed
    pub fn failures(&self) -> impl Iterator<Item = &FunctionTranslation> {
        self.functions.iter().filter(|f| !f.is_ok())
    }

    /// Join every output with the configured separator, or return the first
    /// failure
    pub fn render(self) -> Result<String> {
        let outputs = self
            .functions
            .into_iter()
            .map(|f| f.output)
            .collect::<Result<Vec<_>>>()?;
        Ok(outputs.join(&self.separator))
    }

    /// Join the successful outputs, skipping failures
    pub fn render_partial(&self) -> String {
        self.functions
            .iter()
            .filter_map(|f| f.output.as_ref().ok())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Qython → q translator
pub struct Translator {
    config: TranslatorConfig,
    parser: Box<dyn SourceParser>,
}

impl Translator {
    /// Create a translator backed by the tree-sitter parser
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        Self::with_parser(config, TreeSitterParser::new())
    }

    /// Create a translator with a custom parser
    pub fn with_parser(config: TranslatorConfig, parser: impl SourceParser + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parser: Box::new(parser),
        })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one `FunctionDef` node
    pub fn translate_function<N: SyntaxView>(&self, function: &N) -> Result<String> {
        let name = function_name(function);
        let ctx = TranslationContext::root(name);
        let output = QLowerer::new(&self.config).lower_function(function, &ctx);
        match &output {
            Ok(text) => debug!(function = name, bytes = text.len(), "translated function"),
            Err(err) => debug!(function = name, error = %err, "function translation failed"),
        }
        output
    }

    /// Translate every top-level function of a `Module` node
    pub fn translate_module<N: SyntaxView + Sync>(&self, module: &N) -> ModuleTranslation {
        let definitions: Vec<&N> = module
            .children()
            .iter()
            .filter(|c| c.kind() == &NodeKind::FunctionDef)
            .collect();

        let translate = |def: &&N| FunctionTranslation {
            name: function_name(*def).to_string(),
            output: self.translate_function(*def),
        };

        #[cfg(feature = "parallel")]
        let functions: Vec<FunctionTranslation> = if self.config.parallel {
            definitions.par_iter().map(translate).collect()
        } else {
            definitions.iter().map(translate).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let functions: Vec<FunctionTranslation> = definitions.iter().map(translate).collect();

        let translation = ModuleTranslation {
            functions,
            separator: self.config.function_separator.clone(),
        };
        info!(
            functions = translation.functions.len(),
            failed = translation.failures().count(),
            "module translated"
        );
        translation
    }

    /// Parse and translate Qython source text
    pub fn translate_source(&self, source: &str) -> Result<ModuleTranslation> {
        let module = self.parser.parse(source)?;
        Ok(self.translate_module(&module))
    }

    /// Parse and translate a single expression
    pub fn translate_expression(&self, source: &str) -> Result<String> {
        let expression = self.parser.parse_expression(source)?;
        QLowerer::new(&self.config)
            .lower_expression(&expression, &TranslationContext::root("expression"))
    }
}

fn function_name<N: SyntaxView>(function: &N) -> &str {
    function
        .first_child()
        .filter(|c| c.is_name())
        .map_or(UNNAMED_FUNCTION, |c| c.text())
}
