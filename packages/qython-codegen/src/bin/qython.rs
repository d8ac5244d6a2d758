//! Qython → q translator CLI
//!
//! # Usage
//!
//! ```bash
//! # Translate every top-level function of a file
//! cargo run --bin qython -- translate nmsq.qy
//!
//! # Translate one function, write to a file
//! cargo run --bin qython -- translate nmsq.qy --function nmsq_while -o nmsq.q
//!
//! # Translate a single expression
//! cargo run --bin qython -- expr "2 ** 3 ** 2"
//!
//! # Debug logging (or RUST_LOG=qython_codegen=trace)
//! cargo run --bin qython -- -v translate nmsq.qy
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qython_codegen::{ModuleTranslation, Translator, TranslatorConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "qython")]
#[command(about = "Translate Qython source into q", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Translator configuration (YAML, schema version 1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate the top-level functions of a Qython file
    Translate {
        /// Qython source file
        file: PathBuf,

        /// Only translate the function with this name
        #[arg(short, long)]
        function: Option<String>,

        /// Write q output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a JSON report (one entry per function) instead of q source
        #[arg(long)]
        json: bool,
    },

    /// Translate a single expression
    Expr {
        /// Qython expression
        expression: String,
    },
}

#[derive(Serialize)]
struct FunctionReport<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let translator = Translator::new(config).context("Invalid translator configuration")?;
    debug!(
        indent_width = translator.config().indent_width,
        parallel = translator.config().parallel,
        "translator ready"
    );

    match cli.command {
        Commands::Translate {
            file,
            function,
            output,
            json,
        } => translate_file(&translator, &file, function.as_deref(), output, json),
        Commands::Expr { expression } => {
            let q = translator
                .translate_expression(&expression)
                .with_context(|| format!("Failed to translate '{}'", expression))?;
            println!("{}", q);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<TranslatorConfig> {
    match path {
        Some(path) => {
            let path_str = path
                .to_str()
                .with_context(|| format!("Non UTF-8 config path: {}", path.display()))?;
            let config = TranslatorConfig::from_yaml(path_str)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!(path = %path.display(), "loaded translator config");
            Ok(config)
        }
        None => Ok(TranslatorConfig::default()),
    }
}

fn translate_file(
    translator: &Translator,
    file: &Path,
    function: Option<&str>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut translation = translator
        .translate_source(&source)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if let Some(name) = function {
        translation = translation.select(name);
        if translation.is_empty() {
            bail!("No top-level function named '{}' in {}", name, file.display());
        }
    }

    let rendered = if json {
        render_json(&translation)?
    } else {
        translation.render_partial()
    };

    match output {
        Some(path) => std::fs::write(&path, rendered + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }

    let failed: Vec<_> = translation.failures().collect();
    for failure in &failed {
        if let Err(err) = &failure.output {
            eprintln!("error: {}: {}", failure.name, err);
        }
    }
    if !failed.is_empty() {
        bail!("{} function(s) failed to translate", failed.len());
    }
    Ok(())
}

fn render_json(translation: &ModuleTranslation) -> Result<String> {
    let reports: Vec<FunctionReport<'_>> = translation
        .functions
        .iter()
        .map(|f| FunctionReport {
            name: &f.name,
            output: f.output.as_deref().ok(),
            error: f.output.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    serde_json::to_string_pretty(&reports).context("Failed to serialize report")
}
