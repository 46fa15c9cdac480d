//! pressmark - font stylesheets and block rendering from the command line

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use pressmark::blocks::{disabled_queries, ParsedBlock, Renderer};
use pressmark::fonts::{Webfont, WebfontRegistry};
use pressmark::SiteConfig;

#[derive(Parser, Debug)]
#[command(name = "pressmark")]
#[command(version, about = "Font stylesheets and block rendering", long_about = None)]
#[command(after_help = "EXAMPLES:
    pressmark fonts theme-fonts.yaml            Print @font-face rules
    pressmark --config site.yaml render doc.json Render a block document")]
struct Cli {
    /// Site configuration (YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the @font-face stylesheet for a mapping of webfonts
    Fonts {
        /// JSON or YAML file mapping webfont keys to descriptors
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Render a parsed block document
    Render {
        /// JSON array of parsed blocks
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// List queries whose enhanced pagination gets disabled instead of rendering
        #[arg(long)]
        disabled: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_for(cli.verbose))
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(cli: Cli) -> Result<String> {
    let site = load_site(cli.config.as_deref())?;

    match cli.command {
        Command::Fonts { file } => {
            let registry = read_webfonts(&file)?;
            log::info!("generating styles for {} webfonts", registry.len());
            Ok(registry.generate_styles(&site))
        }
        Command::Render { file, disabled } => {
            let blocks = read_blocks(&file)?;
            if disabled {
                let ids: Vec<String> = disabled_queries(&blocks, &site.blocks)
                    .into_iter()
                    .map(|id| format!("{id}\n"))
                    .collect();
                return Ok(ids.concat());
            }
            Ok(Renderer::new(site).render(&blocks))
        }
    }
}

fn load_site(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("failed to load site config {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads a webfont manifest: an object mapping keys to descriptor objects.
fn read_webfonts(path: &Path) -> Result<WebfontRegistry> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let manifest: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(&source)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&source)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };

    let serde_json::Value::Object(entries) = manifest else {
        bail!("{} must map webfont keys to descriptors", path.display());
    };

    let mut registry = WebfontRegistry::new();
    for (key, descriptor) in entries {
        let webfont: Webfont = serde_json::from_value(descriptor)
            .with_context(|| format!("webfont '{key}' is not an object"))?;
        registry.register(key, webfont);
    }
    Ok(registry)
}

fn read_blocks(path: &Path) -> Result<Vec<ParsedBlock>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("{} is not a parsed block document", path.display()))
}
