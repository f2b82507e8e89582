//! Card Server - card pack registry and random draws over HTTP
//!
//! Serves the card reveal page, its card images, and the pack/draw API.
//! Watches the pack config and reloads it when it changes.

use card_server::{serve, PackRegistry, ServeConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Card reveal server - serves card packs and random card draws
#[derive(Parser, Debug)]
#[command(name = "card_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to the pack config (JSON: packId -> {name, totalCards, folder, cardBack})
    #[arg(long, default_value = "packs.json")]
    packs: PathBuf,

    /// Directory served under /cards
    #[arg(long, default_value = "cards")]
    cards_dir: PathBuf,

    /// Directory with the page's static files
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,

    /// Cards per draw when the request does not pass ?count=
    #[arg(long, default_value_t = card_server::DEFAULT_DRAW_COUNT)]
    draw_count: u32,

    /// How often to check the pack config for changes (0 disables reloading)
    #[arg(long, default_value_t = 2)]
    reload_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting card_server...");
    log::info!("Pack config: {}", args.packs.display());

    let registry = Arc::new(PackRegistry::new(&args.packs));

    if args.reload_interval_secs > 0 {
        registry.watch(Duration::from_secs(args.reload_interval_secs));
    } else {
        log::info!("Pack config reloading disabled");
    }

    let config = ServeConfig {
        port: args.port,
        cards_dir: args.cards_dir,
        public_dir: args.public_dir,
        draw_count: args.draw_count,
    };

    if let Err(e) = serve(registry, config).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
