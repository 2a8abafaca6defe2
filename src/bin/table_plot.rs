//! Render debug overlays for a table-detection artifact.
//!
//! Usage:
//!   table-plot table.json page.png --kind grid --output grid.png
//!   table-plot table.json page.png --all --output-dir plots/ --format svg

use std::path::PathBuf;
use std::process;

use clap::Parser;
use table_plot::plot::{PlotKind, PlotOptions, Plotter};
use table_plot::rendering::RenderOptions;
use table_plot::{Artifact, PageRaster};

#[derive(Parser)]
#[command(name = "table-plot", about = "Draw table-detection artifacts over the page raster")]
struct Args {
    /// Artifact manifest (JSON)
    artifact: PathBuf,
    /// Page raster (PNG, JPEG or TIFF)
    image: PathBuf,
    /// Overlay kind: box, grid, contour, edge-guide, intersection, segment
    #[arg(short, long, default_value = "box")]
    kind: String,
    /// Output file; the extension selects png, jpg, svg or json
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Render every kind supported by the artifact's detection mode
    #[arg(long)]
    all: bool,
    /// Directory for --all output
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// File extension for --all output
    #[arg(long, default_value = "png")]
    format: String,
    /// Canvas width in pixels
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Stroke width in pixels
    #[arg(long, default_value_t = 1.5)]
    line_width: f32,
}

fn run(args: Args) -> table_plot::Result<()> {
    let raster = PageRaster::open(&args.image)?;
    let manifest = std::fs::read_to_string(&args.artifact)?;
    let artifact = Artifact::from_json(&manifest, raster)?;
    log::info!(
        "Loaded {} artifact from {} ({}x{} page)",
        artifact.mode,
        args.artifact.display(),
        artifact.page_width(),
        artifact.page_height()
    );

    let plotter = Plotter::new()
        .with_options(PlotOptions::default().with_line_width(args.line_width))
        .with_render_options(RenderOptions::with_width(args.width));

    if args.all {
        std::fs::create_dir_all(&args.output_dir)?;
        for figure in plotter.render_all(&artifact)? {
            let path = args
                .output_dir
                .join(format!("{}.{}", figure.kind(), args.format));
            plotter.export(&figure, &path)?;
            println!("{}", path.display());
        }
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", args.kind)));
    let figure = plotter.render(&artifact, &args.kind, Some(&output))?;
    println!(
        "{}: {} patches, {} lines, {} markers -> {}",
        figure.kind(),
        figure.patch_count(),
        figure.line_count(),
        figure.marker_count(),
        output.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.all && args.kind.parse::<PlotKind>().is_err() {
        eprintln!(
            "Error: unknown kind '{}' (expected one of: {})",
            args.kind,
            PlotKind::ALL.map(|k| k.as_str()).join(", ")
        );
        process::exit(2);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
