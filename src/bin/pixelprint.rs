use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pixelprint::{DrawMode, PrintConfig, PrintSession, RgbaSurface};

#[derive(Parser, Debug)]
#[command(name = "pixelprint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an image pixel by pixel and write the final surface as a PNG.
    Run(RunArgs),
    /// Cluster an image's palette and print the centers as JSON.
    Palette(PaletteArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional JSON config (camelCase keys, same as the in-page controls).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw mode, overrides the config file.
    #[arg(long)]
    mode: Option<DrawMode>,

    /// Pixels painted per frame, overrides the config file.
    #[arg(long)]
    pixels_per_frame: Option<i64>,

    /// Milliseconds between frames, overrides the config file.
    #[arg(long)]
    frame_delay: Option<i64>,

    /// Palette cluster count, overrides the config file.
    #[arg(long)]
    palette_count: Option<i64>,

    /// Shuffle draw orders.
    #[arg(long)]
    random: bool,

    /// Clear the canvas between palette clusters.
    #[arg(long)]
    clear_between: bool,

    /// Shuffle seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Step as fast as possible instead of sleeping between frames.
    #[arg(long)]
    no_delay: bool,

    /// In palette mode, jump to the next cluster every N frames.
    #[arg(long)]
    advance_every: Option<u64>,

    /// Write a PNG snapshot every N frames into `--snapshot-dir`.
    #[arg(long, requires = "snapshot_dir")]
    snapshot_every: Option<u64>,

    /// Directory for frame snapshots.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Cluster count.
    #[arg(long, default_value_t = 20)]
    k: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Palette(args) => cmd_palette(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<PrintConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: PrintConfig = serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(config)
}

fn build_config(args: &RunArgs) -> anyhow::Result<PrintConfig> {
    let mut config = match &args.config {
        Some(path) => read_config_json(path)?,
        None => PrintConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.color_mode = mode;
    }
    if let Some(n) = args.pixels_per_frame {
        config.pixels_per_frame = n;
    }
    if let Some(ms) = args.frame_delay {
        config.frame_delay = ms;
    }
    if let Some(k) = args.palette_count {
        config.palette_count = k;
    }
    if args.random {
        config.random_order = true;
    }
    if args.clear_between {
        config.clear_between = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn write_png(path: &Path, surface: &RgbaSurface) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let dims = surface.dims();
    image::save_buffer_with_format(
        path,
        surface.as_bytes(),
        dims.width,
        dims.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let pixels = pixelprint::load_pixels_from_path(&args.in_path)
        .with_context(|| format!("load image '{}'", args.in_path.display()))?;
    eprintln!(
        "Image loaded: {}x{} ({} mode)",
        pixels.width(),
        pixels.height(),
        config.color_mode
    );

    let mut surface = RgbaSurface::from_buffer(&pixels);
    let mut session = PrintSession::new(config);
    session.load_pixels(pixels);
    session.start_run_on(&mut surface);

    let mut frame = 0u64;
    loop {
        let step = session.frame_tick(&mut surface);
        frame += 1;

        if let (Some(every), Some(dir)) = (args.snapshot_every, &args.snapshot_dir)
            && every > 0
            && frame % every == 0
        {
            write_png(&dir.join(format!("frame_{frame:06}.png")), &surface)?;
        }

        if !step.wants_more() {
            eprintln!("{}", step.progress);
            break;
        }
        if frame % 100 == 0 {
            eprintln!("{}", step.progress);
        }

        if let Some(every) = args.advance_every
            && every > 0
            && frame % every == 0
        {
            session.advance_cluster();
        }

        if !args.no_delay {
            std::thread::sleep(session.frame_delay());
        }
    }

    write_png(&args.out, &surface)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct PaletteEntry {
    center: pixelprint::Rgb8,
    pixels: usize,
}

fn cmd_palette(args: PaletteArgs) -> anyhow::Result<()> {
    let pixels = pixelprint::load_pixels_from_path(&args.in_path)
        .with_context(|| format!("load image '{}'", args.in_path.display()))?;
    let k = args.k.min(pixels.pixel_count().max(1));
    let model = pixelprint::cluster_palette(&pixels, k)?;

    let entries: Vec<PaletteEntry> = model
        .centers()
        .iter()
        .zip(model.members())
        .map(|(&center, members)| PaletteEntry {
            center,
            pixels: members.len(),
        })
        .collect();
    let out = serde_json::json!({
        "k": model.k(),
        "iterations": model.iterations(),
        "converged": model.converged(),
        "clusters": entries,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
