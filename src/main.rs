#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use textlens_rust_gui::config::Config;
use textlens_rust_gui::{app, logging, PosFilter, TextAnalyzer};

/// Explore tokens, lemmas, POS tags, entities and sentiment of a text.
///
/// Without --text or --input the desktop window opens.
#[derive(Parser, Debug)]
#[command(name = "textlens", version)]
struct Cli {
    /// TOML config naming the language resources (default: ./textlens.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Analyze this text and print the report instead of opening the window
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Analyze the contents of this file ("-" for stdin) and print the report
    #[arg(long)]
    input: Option<PathBuf>,

    /// Keep only tokens with this POS tag
    #[arg(long, value_enum, default_value_t = PosFilter::All)]
    filter: PosFilter,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn headless_text(&self) -> Result<Option<String>> {
        if let Some(text) = &self.text {
            return Ok(Some(text.clone()));
        }
        match &self.input {
            Some(path) if path.as_os_str() == "-" => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
                Ok(Some(buffer))
            }
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read input file {:?}", path)),
            None => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let analyzer = TextAnalyzer::from_config(&config.resources).context("Failed to load language resources")?;
    tracing::info!("Analyzer ready ({})", analyzer.pipeline_name());

    if let Some(text) = cli.headless_text()? {
        let report = analyzer.analyze(&text)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report.filtered(cli.filter))?);
        } else {
            print!("{}", report.render(cli.filter));
        }
        return Ok(());
    }

    app::run(&config.window, analyzer).map_err(|e| anyhow::anyhow!("Failed to open the window: {}", e))
}
