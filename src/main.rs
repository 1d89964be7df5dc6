//! vlist demo - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vlist::model::ListError;
use vlist::source::RecordSource;
use vlist::view::{ColorConfig, ListStyles};

/// vlist - virtualized list demo in the terminal
#[derive(Parser, Debug)]
#[command(name = "vlist")]
#[command(version)]
#[command(about = "Scroll, select and drag through a large virtualized list")]
pub struct Args {
    /// JSON array of records (generates records if not provided)
    pub file: Option<PathBuf>,

    /// Number of records to generate when no file is given
    #[arg(short = 'n', long, default_value = "1000")]
    pub count: usize,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Row height in cells (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub item_height: Option<u32>,

    /// Hide icons whose image fails to load
    #[arg(long)]
    pub hide_broken_images: bool,

    /// Keep the hover highlight while a selection exists
    #[arg(long)]
    pub selected_plus_hover: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), ListError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = vlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = vlist::config::merge_config(config_file);
        let with_env = vlist::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let hide_override = args.hide_broken_images.then_some(true);
        let hover_override = args.selected_plus_hover.then_some(true);
        vlist::config::apply_cli_overrides(with_env, args.item_height, hide_override, hover_override)
    };

    vlist::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let metrics = config.item_metrics()?;
    let records = RecordSource::detect(args.file.clone(), args.count).load()?;
    let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));

    vlist::view::run_with_records(&records, metrics, config.list, styles)?;
    Ok(())
}
