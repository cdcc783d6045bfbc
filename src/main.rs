use clap::{Parser, Subcommand};
use folio::server::{self, AppState};
use folio::{config, gallery, output};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Serve a directory of photos and videos as a web gallery")]
#[command(long_about = "\
Serve a directory of photos and videos as a web gallery

Your filesystem is the data source. Subdirectories of the media root become
folder tiles; media files become thumbnails that open in a lightbox.

Media root structure:

  media/
  ├── config.toml          # Site title, author, colors (optional)
  ├── beach_sunset.jpg     # Root file tile
  ├── clip.mp4             # Video tile, captioned \"Video\"
  ├── alps/                # Folder tile, links to /alps
  │   ├── cover.jpg        # Folder cover (name starts with \"cover\")
  │   └── peak.jpg
  └── .trash/              # Hidden entries are ignored

Caption resolution (first available wins):
  EXIF ImageDescription → EXIF XPTitle → IPTC ObjectName → IPTC Caption-Abstract
  → EXIF DateTimeOriginal (\"March 15, 2024\") → EXIF Model
  → \"Video\" for videos, otherwise the file name (beach_sunset → \"beach sunset\")

The root page also lists every media file in nested folders in the lightbox.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Media directory
    #[arg(long, env = "FOLIO_ROOT", default_value = "media", global = true)]
    root: PathBuf,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000, global = true)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "FOLIO_BIND", default_value = "0.0.0.0", global = true)]
    bind: IpAddr,

    /// Config file (defaults to <root>/config.toml when present)
    #[arg(long, env = "FOLIO_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print what the root page would show, without serving
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let site_config = config::load_config(cli.config.as_deref(), &cli.root)?;
            if !cli.root.is_dir() {
                tracing::warn!(
                    root = %cli.root.display(),
                    "media root is not a directory; pages will fail until it exists"
                );
            }
            let state = AppState {
                root: cli.root,
                config: site_config,
            };
            let addr = SocketAddr::new(cli.bind, cli.port);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(server::serve(state, addr))?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            config::load_config(cli.config.as_deref(), &cli.root)?;
            let page = gallery::assemble_root(&cli.root)?;
            output::print_check_output(&page);
            println!("==> Media root is readable");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
