use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wanderlens::context::GalleryContext;
use wanderlens::{config, output, site};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "wanderlens")]
#[command(about = "Static gallery builder for remote travel photo albums")]
#[command(long_about = "\
Static gallery builder for remote travel photo albums

A remote repository is the data source. Directories under the media base
become albums; their images are normalized into bounded display bitmaps and
rendered as grid pages, with a hub page of album cards linking to them.

Remote layout:

  travel/                          # Media base (remote repository)
  ├── Boston/                      # Album (one card + one page each)
  │   ├── IMG_3201.jpeg            # Plain image → resized for display
  │   ├── IMG_3257.heic            # Raw capture → converted, then resized
  │   └── IMG_3295.mov             # Video → playable element, never converted
  └── Random_Nepal/
      └── IMG_1044.jpeg

When the remote listing is unavailable (or genuinely empty — the endpoint
cannot tell the difference), embedded fallback manifests take over, so a
site always builds.

Run 'wanderlens gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the travel hub page (album cards)
    Hub,
    /// Render one album page
    Album {
        /// Album identifier (directory name under the media base)
        slug: String,
    },
    /// Build the whole site: hub plus every album page
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_worker_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        command => {
            init_tracing();
            let gallery_config = config::load_config(cli.config.as_deref())?;
            init_worker_pool(&gallery_config.processing);
            let ctx = GalleryContext::new(gallery_config)?;
            run(command, &ctx, &cli.output)?;
        }
    }

    Ok(())
}

fn run(
    command: &Command,
    ctx: &GalleryContext,
    output_dir: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Hub => {
            let render = site::render_travel_hub(ctx, output_dir)?;
            output::print_hub_summary(&render);
        }
        Command::Album { slug } => {
            let render = site::render_album_gallery(ctx, output_dir, slug)?;
            output::print_album_summary(&render);
        }
        Command::Build => {
            println!("==> Building site → {}", output_dir.display());
            let summary = site::build_site(ctx, output_dir)?;
            output::print_build_summary(&summary);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::GenConfig => {}
    }
    Ok(())
}
