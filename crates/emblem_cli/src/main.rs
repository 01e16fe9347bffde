//! Emblem CLI
//!
//! The external collaborator for the render engine: gathers the text,
//! font, colors, and canvas parameters, runs the pipeline, and writes the
//! result to a PNG. Also exposes font discovery for pickers and scripts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use emblem_core::Paint;
use emblem_render::{export_png, render, RenderRequest};
use emblem_text::FontResolver;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Smallest accepted canvas edge, matching the interactive designer
const MIN_CANVAS_EDGE: u32 = 50;

#[derive(Parser)]
#[command(name = "emblem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render styled logo text to PNG", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a logo and write it to a PNG file
    Render {
        /// Text to render
        #[arg(short, long, default_value = "A")]
        text: String,

        /// Font name or file path, as printed by `emblem fonts`
        #[arg(short, long, default_value = "default")]
        font: String,

        /// Font size in points
        #[arg(short, long, default_value = "72")]
        size: u32,

        /// Enable the pseudo-3D extrusion effect
        #[arg(long)]
        three_d: bool,

        /// Extrusion depth in pixels (with --three-d)
        #[arg(short, long, default_value = "5")]
        depth: u32,

        /// Background color: RRGGBB, or RRGGBB:RRGGBB for a gradient
        #[arg(short, long, default_value = "#FFFFFF")]
        background: String,

        /// Text color: RRGGBB, or RRGGBB:RRGGBB for a gradient
        #[arg(short = 'c', long, default_value = "#000000")]
        fill: String,

        /// Canvas width in pixels
        #[arg(long, default_value = "500")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "500")]
        height: u32,

        /// Output PNG path
        #[arg(short, long, default_value = "logo.png")]
        output: PathBuf,
    },

    /// List fonts available to the renderer
    Fonts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Render {
            text,
            font,
            size,
            three_d,
            depth,
            background,
            fill,
            width,
            height,
            output,
        } => {
            if width < MIN_CANVAS_EDGE || height < MIN_CANVAS_EDGE {
                bail!("canvas dimensions must be at least {MIN_CANVAS_EDGE}x{MIN_CANVAS_EDGE}");
            }

            let request = RenderRequest {
                text,
                font,
                size,
                extrude: three_d.then(|| depth.max(1)),
                background: Paint::parse(&background)
                    .with_context(|| format!("invalid background color {background:?}"))?,
                fill: Paint::parse(&fill)
                    .with_context(|| format!("invalid text color {fill:?}"))?,
                width,
                height,
            };

            let mut fonts = FontResolver::new();
            let pixmap = render(&request, &mut fonts)?;
            export_png(&pixmap, &output)?;
            tracing::info!(path = %output.display(), "logo written");
        }

        Commands::Fonts => {
            let mut fonts = FontResolver::new();
            for entry in fonts.discover() {
                println!("{}\t{}", entry.name, entry.locator);
            }
        }
    }

    Ok(())
}
