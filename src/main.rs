use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use odata_translator::{edm::EdmCatalog, QueryDescription, Translator, TranslatorConfig};

/// odata-translate - Render a structured query description as OData query options
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// EDM catalog (YAML)
    #[arg(long)]
    schema: PathBuf,

    /// Query description (YAML or JSON)
    #[arg(long)]
    query: PathBuf,

    /// Translator configuration (YAML); environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the expected result row shape as well
    #[arg(long)]
    show_shape: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => TranslatorConfig::from_yaml_file(path)?,
        None => TranslatorConfig::from_env()?,
    };
    let catalog = EdmCatalog::from_yaml_file(&cli.schema)?;

    let content = std::fs::read_to_string(&cli.query)
        .with_context(|| format!("reading {}", cli.query.display()))?;
    let query: QueryDescription = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing {}", cli.query.display()))?;

    let composed = Translator::new(&catalog, config).translate(&query)?;
    println!("{}", composed.options);

    if cli.show_shape {
        if let Some(shape) = composed.result_shape {
            for column in shape.columns() {
                println!(
                    "{}\t{}\t{:?}\tnullable={}",
                    column.name,
                    column.json_pointer(),
                    column.ty,
                    column.nullable
                );
            }
        }
    }
    Ok(())
}

fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Translation error: {:#}", e);
        std::process::exit(1);
    }
}
