use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{Vec3, Vec4};
use glaze_common::{FragmentInput, ViewState};
use glaze_envmap::{EnvironmentMap, Sampler};
use glaze_material::GlassMaterial;
use glaze_render::{CpuRenderer, RenderView, Renderer, SphereScene};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glaze-cli", about = "CLI tool for glaze operations")]
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
    /// Render the glass sphere to a PNG with the CPU reference renderer
    Render {
        #[arg(long, default_value = "512")]
        width: u32,
        #[arg(long, default_value = "512")]
        height: u32,
        /// Equirectangular environment image; procedural sky when omitted
        #[arg(long)]
        env: Option<PathBuf>,
        /// Material preset JSON; canonical defaults when omitted
        #[arg(long)]
        preset: Option<PathBuf>,
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,
    },
    /// Evaluate the material at a view angle and print every shading term
    Probe {
        /// Angle between surface normal and view direction, in degrees
        #[arg(short, long, default_value = "0")]
        angle: f32,
        /// Equirectangular environment image; procedural sky when omitted
        #[arg(long)]
        env: Option<PathBuf>,
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
            println!("glaze-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", glaze_common::crate_info());
            println!("envmap: {}", glaze_envmap::crate_info());
            println!("material: {}", glaze_material::crate_info());
            println!("render: {}", glaze_render::crate_info());
        }
        Commands::Render {
            width,
            height,
            env,
            preset,
            output,
        } => {
            let environment = load_environment(env.as_deref())?;
            let material = match preset {
                Some(path) => GlassMaterial::load_preset(&path)
                    .with_context(|| format!("loading preset {path:?}"))?,
                None => GlassMaterial::default(),
            };

            let scene = SphereScene::new(material, environment);
            let fb = CpuRenderer::new(width, height).render(&scene, &RenderView::default());

            let image = image::RgbaImage::from_raw(fb.width(), fb.height(), fb.to_rgba8())
                .context("framebuffer size mismatch")?;
            image
                .save(&output)
                .with_context(|| format!("writing {output:?}"))?;
            println!("Rendered {width}x{height} to {}", output.display());
        }
        Commands::Probe { angle, env } => {
            let environment = load_environment(env.as_deref())?;

            // Surface point at the +Z pole of the unit sphere; the camera
            // swings around it by the requested angle.
            let theta = angle.to_radians();
            let surface = Vec3::Z;
            let view = ViewState::new(
                surface + 3.0 * Vec3::new(theta.sin(), 0.0, theta.cos()),
            );
            let frag = FragmentInput {
                front_facing: true,
                screen_position: Vec4::new(0.5, 0.5, 3.0, 1.0),
                world_position: surface,
                world_normal: Vec3::Z,
            };

            let breakdown = GlassMaterial::default().evaluate(
                &frag,
                &view,
                &environment,
                &Sampler::default(),
            );
            println!("Shading {angle} degrees off normal:");
            println!("{breakdown}");
        }
    }

    Ok(())
}

fn load_environment(path: Option<&Path>) -> anyhow::Result<EnvironmentMap> {
    match path {
        Some(path) => EnvironmentMap::from_path(path)
            .with_context(|| format!("loading environment {path:?}")),
        None => Ok(EnvironmentMap::sky_gradient(512, 256)),
    }
}
