use card_client::{
    deal, default_export_path, export_deck, load_packs, AppState, ClientError, ClientResult,
    PackClient, RarityFilter, DEFAULT_SERVER_URL,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Open a card pack from a running card server and export the picks
#[derive(Parser, Debug)]
#[command(name = "card_client")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the card server
    #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Pack to open (default: first pack the server lists)
    #[arg(short, long)]
    pack: Option<String>,

    /// Cards per deal (default: the server's setting)
    #[arg(short, long)]
    count: Option<u32>,

    /// Which revealed cards to add to the deck: "all" or a rarity
    #[arg(long, default_value = "all")]
    select: RarityFilter,

    /// Where to write the deck archive (default: downloads folder)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> ClientResult<()> {
    let select = args.select;
    let client = PackClient::new(&args.server);
    let shared = Mutex::new(AppState::new());

    load_packs(&shared, &client).await?;
    {
        let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pack) = args.pack.as_deref() {
            state.select_pack(pack)?;
        }
        if let Some(pack) = state.current_pack() {
            println!("Opening {} ({} cards)", pack.name, pack.total_cards);
        }
    }

    deal(&shared, &client, args.count).await?;

    // Nothing else is in flight from here on
    let mut state = shared.into_inner().unwrap_or_else(PoisonError::into_inner);

    let dealt = state.table().map(|t| t.len()).unwrap_or(0);
    {
        let mut rng = rand::thread_rng();
        for index in 0..dealt {
            state.click_card(index, &mut rng)?;
        }
    }

    for index in 0..dealt {
        let presentation = state.table().and_then(|t| t.get(index));
        let Some(presentation) = presentation else {
            continue;
        };
        let rarity = presentation.rarity().ok_or(ClientError::CardNotRevealed(index))?;
        println!("  {:<10} {}", rarity, presentation.card());
        if select.matches(rarity) {
            state.toggle_selection(index)?;
        }
    }

    println!("Deck: {}", state.summary());
    if state.deck().is_empty() {
        println!("No cards matched '{}', nothing to export", select);
        return Ok(());
    }

    let archive = export_deck(state.deck(), &client).await?;
    let path = args.output.unwrap_or_else(default_export_path);
    archive.write_to(&path)?;
    println!(
        "Exported {} card(s) to {}",
        archive.image_count(),
        path.display()
    );
    if !archive.manifest.skipped.is_empty() {
        println!("{} card(s) could not be fetched", archive.manifest.skipped.len());
    }

    Ok(())
}
