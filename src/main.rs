//! Waterfall Viewer - P&L Table & Waterfall Chart Viewer
//!
//! Loads small financial CSV datasets, shows an animated waterfall chart per
//! category alongside a formatted P&L table, and exports static SVG/PNG charts
//! or a self-contained HTML report.

mod charts;
mod config;
mod controller;
mod data;
mod gui;
mod report;

use anyhow::{Context, Result};
use charts::StaticChartRenderer;
use clap::{Args, Parser, Subcommand, ValueHint};
use config::ChartConfig;
use controller::WaterfallController;
use data::DataLoader;
use eframe::egui;
use gui::WaterfallApp;
use report::HtmlReport;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Waterfall chart & P&L table viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive viewer (default)
    View(ViewArgs),
    /// Write one category's chart as SVG or PNG
    Chart(ChartArgs),
    /// Write an HTML report with every category and the P&L table
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// Waterfall CSV (`category,name,value`) to load on start
    #[arg(long, value_hint = ValueHint::FilePath)]
    data: Option<PathBuf>,

    /// P&L CSV (`name,FY18,...`) to load on start
    #[arg(long, value_hint = ValueHint::FilePath)]
    pnl: Option<PathBuf>,

    /// JSON chart configuration
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[arg(long, value_hint = ValueHint::FilePath)]
    data: PathBuf,

    /// Category to draw (defaults to the first one in the file)
    #[arg(long)]
    category: Option<String>,

    /// Output file; `.png` renders a bitmap, anything else SVG
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[arg(long, value_hint = ValueHint::FilePath)]
    data: PathBuf,

    #[arg(long, value_hint = ValueHint::FilePath)]
    pnl: Option<PathBuf>,

    /// Output file (default: temp file opened in the browser)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<ChartConfig> {
    match path {
        Some(path) => ChartConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ChartConfig::default()),
    }
}

fn load_controller(data: &Path, config: ChartConfig) -> Result<WaterfallController> {
    let records = DataLoader::load_records(data)
        .with_context(|| format!("Failed to load {}", data.display()))?;
    Ok(WaterfallController::new(records, config)?)
}

fn run_view(args: ViewArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Waterfall Viewer"),
        ..Default::default()
    };

    log::info!("Launching viewer window");
    eframe::run_native(
        "Waterfall Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(WaterfallApp::new(cc, config, args.data, args.pnl)))),
    )
    .map_err(|e| anyhow::anyhow!("Viewer failed: {e}"))
}

fn run_chart(args: ChartArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut controller = load_controller(&args.data, config)?;
    if let Some(category) = &args.category {
        controller.select(category)?;
    }

    let state = &controller.frame().state;
    let font_size = controller.config().font_size;
    let is_png = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        StaticChartRenderer::render_png(state, font_size, &args.output)?;
    } else {
        let svg = StaticChartRenderer::render_svg(state, font_size)?;
        std::fs::write(&args.output, svg)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    log::info!(
        "Chart for '{}' written to {}",
        controller.selected(),
        args.output.display()
    );
    println!("Chart written to: {}", args.output.display());
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let controller = load_controller(&args.data, config)?;
    let pnl = args
        .pnl
        .as_deref()
        .map(|path| {
            DataLoader::load_pnl(path)
                .with_context(|| format!("Failed to load {}", path.display()))
        })
        .transpose()?;

    match args.output {
        Some(path) => {
            HtmlReport::write(&controller, pnl.as_ref(), &path)?;
            println!("HTML report written to: {}", path.display());
        }
        None => {
            let path = std::env::temp_dir().join("waterfall-report.html");
            HtmlReport::write(&controller, pnl.as_ref(), &path)?;
            open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
            println!("Opened HTML report in browser: {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::View(ViewArgs::default())) {
        Command::View(args) => run_view(args),
        Command::Chart(args) => run_chart(args),
        Command::Report(args) => run_report(args),
    }
}
