use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use streetpano::io::{load_json, write_json, CropReport, WalkReport};
use streetpano::pipeline;
use streetpano::projection::{evenly_spaced_headings, CropParams, CropPlan};
use streetpano::walk::{PanoGraph, StreetWalker};
use streetpano::PipelineError;

#[derive(Parser)]
#[command(name = "streetpano", version)]
#[command(about = "Stitch, crop and walk street-level panoramas", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit tracing spans as JSON lines
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut perspective crops out of an equirectangular panorama
    Crop(CropArgs),
    /// Stitch z{Z}_x{x}_y{y} tiles into one equirectangular image
    Stitch(StitchArgs),
    /// Walk a pano graph from a start pano
    Walk(WalkArgs),
}

#[derive(Args)]
struct CropArgs {
    /// Equirectangular panorama to crop
    #[arg(long)]
    input: PathBuf,

    /// Directory for the crops and crop_metadata.json
    #[arg(long)]
    output_dir: PathBuf,

    /// JSON file with crop parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field of view in degrees
    #[arg(long)]
    fov: Option<f64>,

    /// Output crop edge in pixels
    #[arg(long)]
    size: Option<usize>,

    /// Heading increment between crops
    #[arg(long, conflicts_with = "count")]
    heading_step: Option<f64>,

    /// Number of evenly spaced crops instead of a fixed step
    #[arg(long)]
    count: Option<usize>,

    /// First heading when using --count
    #[arg(long, requires = "count", allow_negative_numbers = true)]
    base_heading: Option<f64>,

    /// Pitch to sweep; repeat for several rings
    #[arg(long = "pitch", allow_negative_numbers = true)]
    pitches: Vec<f64>,
}

#[derive(Args)]
struct StitchArgs {
    /// Directory holding the tiles
    #[arg(long)]
    tiles_dir: PathBuf,

    /// Zoom level of the tiles to stitch
    #[arg(long, allow_negative_numbers = true)]
    zoom: i32,

    /// Output image; format follows the extension
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args)]
struct WalkArgs {
    /// Pano graph JSON ({ "nodes": [...] })
    #[arg(long)]
    graph: PathBuf,

    /// Pano id to start from
    #[arg(long)]
    start: String,

    /// Maximum number of panos to visit
    #[arg(long, default_value_t = 10)]
    num_panos: usize,

    /// Zoom used for the forward tile column of each pano
    #[arg(long, default_value_t = 3)]
    zoom: i32,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Command::Crop(args) => run_crop(args).map(|report| {
            println!(
                "wrote {} crops and crop_metadata.json",
                report.crops.len()
            );
        }),
        Command::Stitch(args) => run_stitch(args),
        Command::Walk(args) => run_walk(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = streetpano::core::level_for_verbosity(cli.verbose);

    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init_with_filter(level);
        let _ = streetpano::core::init_tracing(cli.json_log, level);
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = streetpano::core::init_with_level(level);
    }
}

fn crop_params(args: &CropArgs) -> Result<CropParams, PipelineError> {
    let mut params = match &args.config {
        Some(path) => load_json::<CropParams>(path)?,
        None => CropParams::default(),
    };
    if let Some(fov) = args.fov {
        params.fov_deg = fov;
    }
    if let Some(size) = args.size {
        params.out_size = size;
    }
    if let Some(step) = args.heading_step {
        params.heading_step_deg = step;
    }
    if !args.pitches.is_empty() {
        params.pitches_deg = args.pitches.clone();
    }
    Ok(params)
}

fn run_crop(args: CropArgs) -> Result<CropReport, PipelineError> {
    let params = crop_params(&args)?;
    let plan = match args.count {
        Some(count) => CropPlan {
            fov_deg: params.fov_deg,
            out_size: params.out_size,
            headings_deg: evenly_spaced_headings(args.base_heading.unwrap_or(0.0), count)?,
            pitches_deg: params.pitches_deg.clone(),
        },
        None => params.plan()?,
    };

    let pano = pipeline::load_rgb(&args.input)?;
    log::info!(
        "{}: {}x{}, {} crops at fov {}",
        args.input.display(),
        pano.width,
        pano.height,
        plan.len(),
        plan.fov_deg
    );
    pipeline::write_crops(
        &args.input.display().to_string(),
        &pano,
        &plan,
        &args.output_dir,
    )
}

fn run_stitch(args: StitchArgs) -> Result<(), PipelineError> {
    let pano = pipeline::stitch_dir(&args.tiles_dir, args.zoom)?;
    pipeline::save_rgb(&pano, &args.output)?;
    log::info!(
        "stitched {}x{} -> {}",
        pano.width,
        pano.height,
        args.output.display()
    );
    Ok(())
}

fn run_walk(args: WalkArgs) -> Result<(), PipelineError> {
    let graph: PanoGraph = load_json(&args.graph)?;
    let walk = StreetWalker::new(&graph, args.num_panos).walk(&args.start)?;
    log::info!(
        "visited {} panos from {}: {:?}",
        walk.len(),
        args.start,
        walk.outcome
    );

    let report = WalkReport::from_walk(args.start, &walk, args.zoom)?;
    match &args.output {
        Some(path) => write_json(&report, path)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
