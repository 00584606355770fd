use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use muster_tools::layout::RootSelection;
use muster_tools::pipeline::{self, ExportOutcome};
use muster_tools::render::raster::RasterOptions;
use muster_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Summary(args) => execute_summary(args),
        Command::Layout(args) => execute_layout(args),
        Command::Render(args) => execute_render(args),
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_summary(args: SummaryArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }
    let summary = pipeline::workbook_to_summary(&args.input)?;
    print_json(&summary, args.pretty)
}

fn execute_layout(args: LayoutArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }
    let diagram = pipeline::workbook_to_diagram(&args.input, &root_selection(args.root))?;
    print_json(&diagram, args.pretty)
}

fn execute_render(args: RenderArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }
    let RenderArgs {
        input,
        format,
        output,
        root,
        scale,
        background,
    } = args;
    let output = output.unwrap_or_else(|| PathBuf::from(format.default_filename()));
    let root = root_selection(root);
    let options = RasterOptions { scale, background };

    let outcome = match format {
        RenderFormat::Svg => pipeline::workbook_to_svg(&input, &output, &root)?,
        RenderFormat::Png => pipeline::workbook_to_png(&input, &output, &root, &options)?,
        RenderFormat::Pdf => pipeline::workbook_to_pdf(&input, &output, &root, &options)?,
    };
    if outcome == ExportOutcome::SkippedEmpty {
        eprintln!("no units found in roster; nothing was exported");
    }
    Ok(())
}

fn root_selection(root: Option<String>) -> RootSelection {
    root.map(RootSelection::Named).unwrap_or_default()
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarise personnel rosters and export org charts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate a roster workbook into per-unit personnel counts.
    Summary(SummaryArgs),
    /// Lay out the chart and print its nodes and edges as JSON.
    Layout(LayoutArgs),
    /// Render the chart to an SVG, PNG, or PDF file.
    Render(RenderArgs),
}

#[derive(clap::Args)]
struct SummaryArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Unit to anchor the chart at instead of the first unit seen.
    #[arg(long)]
    root: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = RenderFormat::Png)]
    format: RenderFormat,

    /// Output file path. Defaults to org_chart.<format> in the working directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Unit to anchor the chart at instead of the first unit seen.
    #[arg(long)]
    root: Option<String>,

    /// Scale factor applied when rasterising.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Background colour behind the rendered chart.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderFormat {
    Svg,
    Png,
    Pdf,
}

impl RenderFormat {
    fn default_filename(self) -> &'static str {
        match self {
            RenderFormat::Svg => pipeline::SVG_FILENAME,
            RenderFormat::Png => pipeline::PNG_FILENAME,
            RenderFormat::Pdf => pipeline::PDF_FILENAME,
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Svg => write!(f, "svg"),
            RenderFormat::Png => write!(f, "png"),
            RenderFormat::Pdf => write!(f, "pdf"),
        }
    }
}
