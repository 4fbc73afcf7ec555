use std::path::PathBuf;

use clap::Parser;
use command_api_docgen::config::{CONFIG_ENV, DocgenConfig};
use command_api_docgen::generator::fetch_manifest;
use command_api_docgen::manifest::Manifest;
use command_api_docgen::output::{OutputFormat, format_commands};
use command_api_docgen::select::select_commands;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gen-command-api")]
#[command(about = "Generate the command API reference from the command registry")]
struct Cli {
    /// Read a pre-captured manifest instead of running the generator ("-" for stdin).
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// YAML configuration file. Defaults to $COMMAND_API_DOCS_CONFIG when set.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Column at which help text is wrapped (overrides the config file).
    #[arg(long)]
    width: Option<usize>,
    /// Output format.
    #[arg(long, value_enum, default_value = "rst")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("warning: {err}");
    }

    match run(cli) {
        Ok(document) => print!("{document}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Failed to initialize tracing subscriber: {e}"))
}

fn run(cli: Cli) -> Result<String, String> {
    let mut config = load_config(cli.config)?;
    if let Some(width) = cli.width {
        config.render.wrap_width = width;
        config.validate().map_err(|e| e.to_string())?;
    }

    let manifest = load_manifest(cli.manifest.as_ref(), &config)?;
    info!(commands = manifest.len(), "Loaded manifest");

    let selection = select_commands(manifest).map_err(|e| e.to_string())?;
    info!(
        documented = selection.commands.len(),
        hidden = selection.hidden,
        "Rendering command reference"
    );

    format_commands(&selection.commands, &config.render_options(), cli.format)
}

fn load_config(explicit: Option<PathBuf>) -> Result<DocgenConfig, String> {
    let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => DocgenConfig::load(&path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display())),
        None => Ok(DocgenConfig::default()),
    }
}

fn load_manifest(path: Option<&PathBuf>, config: &DocgenConfig) -> Result<Manifest, String> {
    match path {
        Some(path) if path.as_os_str() == "-" => Manifest::from_reader(std::io::stdin().lock())
            .map_err(|e| format!("Failed to read manifest from stdin: {e}")),
        Some(path) => Manifest::load(path)
            .map_err(|e| format!("Failed to read manifest '{}': {e}", path.display())),
        None => fetch_manifest(&config.generator).map_err(|e| e.to_string()),
    }
}
