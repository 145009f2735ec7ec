use anyhow::Context;
use clap::{Parser, Subcommand};
use pixelboy_common::Viewport;
use pixelboy_figure::{BodyPart, build_layout};
use pixelboy_render::DebugTextRenderer;
use pixelboy_runtime::SceneRuntime;
use pixelboy_scene::SceneConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixelboy-cli", about = "Headless tools for the pixel boy scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the cube layout of the figure
    Figure {
        /// Emit the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run frame steps against the text renderer
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "100")]
        frames: u64,
        /// Viewport width in pixels
        #[arg(long, default_value = "1024")]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value = "768")]
        height: u32,
        /// Scene configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let layout = build_layout();
            let config = SceneConfig::default();
            println!("pixelboy-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("figure: {} cubes in {} parts", layout.len(), layout.parts().len());
            println!(
                "animation: step={} sway_rate={} sway={} bounce={}",
                config.animation.time_step,
                config.animation.sway_rate,
                config.animation.sway_amplitude,
                config.animation.bounce_amplitude
            );
            println!("render: {}", pixelboy_render::crate_info());
        }
        Commands::Figure { json } => {
            let layout = build_layout();
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                for part in BodyPart::ALL {
                    let cubes = layout.part(part);
                    println!("{part:?}: {} cubes", cubes.len());
                    for cube in cubes {
                        let p = cube.position;
                        println!("  ({:>4.1}, {:>4.1}, {:>4.1}) {}", p.x, p.y, p.z, cube.color);
                    }
                }
                let (min, max) = layout.bounds();
                println!("total: {} cubes, bounds {min} .. {max}", layout.len());
            }
        }
        Commands::Simulate {
            frames,
            width,
            height,
            config,
        } => {
            let config = match config {
                Some(path) => SceneConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => SceneConfig::default(),
            };

            let viewport = Viewport::new(width, height);
            tracing::info!("simulating {frames} frames at {viewport}");
            let mut runtime = SceneRuntime::new(config, DebugTextRenderer::new());
            runtime.initialize(viewport)?;

            let mut peak_rotation = 0.0f32;
            let mut peak_offset = 0.0f32;
            for _ in 0..frames {
                let pose = runtime.frame_step()?;
                peak_rotation = peak_rotation.max(pose.rotation.abs());
                peak_offset = peak_offset.max(pose.offset);
            }

            if let Some(report) = runtime.backend().last_frame() {
                print!("{report}");
            }
            println!(
                "Simulated {} frames to t={:.2}: peak |rotation|={peak_rotation:.4} peak offset={peak_offset:.4}",
                runtime.clock().frames(),
                runtime.clock().time()
            );

            runtime.teardown()?;
            tracing::info!("simulation finished");
        }
    }

    Ok(())
}
