use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scorereel::{
    Canvas, Evaluator, Fps, FrameIndex, GatePolicy, StaticAssets, TimelineBuilder, TimelineParams,
    load_roster, load_roster_gated,
};

#[derive(Parser, Debug)]
#[command(name = "scorereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a roster JSON file and report schema violations.
    Validate(ValidateArgs),
    /// Evaluate one frame of the composition and print it as JSON.
    Frame(FrameArgs),
    /// Print the composed windows and per-card timings as JSON.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input roster JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderOpts {
    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output width in pixels.
    #[arg(long, default_value_t = 2560)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 1440)]
    height: u32,

    /// Main (scrolling list) window length in seconds.
    #[arg(long, default_value_t = 200.0)]
    seconds: f64,

    /// Outro clip length in frames; 0 disables the outro window.
    #[arg(long, default_value_t = 600)]
    outro_frames: u64,

    /// Proceed with an empty roster on validation failure or timeout
    /// instead of exiting with an error.
    #[arg(long, default_value_t = false)]
    fail_open: bool,

    /// Roster validation gate timeout in seconds.
    #[arg(long, default_value_t = 60)]
    gate_timeout: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input roster JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input roster JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let params = TimelineParams::for_render(
        Fps::new(60, 1)?,
        Canvas::new(2560, 1440)?,
        200.0,
    );
    let roster = load_roster(&args.in_path, params.cards_to_show)
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;
    eprintln!(
        "ok: {} players, leader '{}'",
        roster.len(),
        roster.leader().map(|p| p.name.as_str()).unwrap_or("-")
    );
    Ok(())
}

fn build_timeline(in_path: &PathBuf, opts: &RenderOpts) -> anyhow::Result<scorereel::Timeline> {
    let params = TimelineParams::for_render(
        Fps::new(opts.fps, 1)?,
        Canvas::new(opts.width, opts.height)?,
        opts.seconds,
    );

    let policy = if opts.fail_open {
        GatePolicy::FailOpen
    } else {
        GatePolicy::FailFast
    };
    let roster = load_roster_gated(
        in_path,
        params.cards_to_show,
        policy,
        Duration::from_secs(opts.gate_timeout),
    )
    .with_context(|| format!("load '{}'", in_path.display()))?;

    let assets = StaticAssets::default();
    let mut builder = TimelineBuilder::new(params).audio(assets.audio_track.clone());
    if opts.outro_frames > 0 {
        builder = builder.outro(assets.outro_clip.clone(), opts.outro_frames);
    }
    Ok(builder.build(&roster)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = build_timeline(&args.in_path, &args.render)?;
    let scene = Evaluator::eval_frame(&timeline, FrameIndex(args.frame))?;
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = build_timeline(&args.in_path, &args.render)?;
    let summary = serde_json::json!({
        "total_frames": timeline.total,
        "windows": timeline.windows(),
        "cards": timeline.cards,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
