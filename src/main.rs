//! Binary entrypoint for the arenabot CLI.
//!
//! Commands:
//! - `start` - run the engine with the local console gateway
//! - `init` - create a starter `config.toml`
//! - `status` - print a summary of the stored entity population
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use arenabot::arena::entity::Status;
use arenabot::arena::flavor::TemplateFlavor;
use arenabot::arena::{ArenaServer, Engine};
use arenabot::config::Config;
use arenabot::gateway::{self, InboundMessage};
use arenabot::storage::EntityStore;

#[derive(Parser)]
#[command(name = "arenabot")]
#[command(about = "A turn-based arena RPG served over a chat gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the engine with a local console gateway
    Start,
    /// Create a starter configuration file
    Init,
    /// Show a summary of the stored entities
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Start => {
            let config = match config {
                Some(c) => c,
                None => Config::load(&cli.config).await?,
            };
            start(config).await
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("wrote {}", cli.config);
            Ok(())
        }
        Commands::Status => {
            let config = config.unwrap_or_default();
            status(&config)
        }
    }
}

fn init_logging(config: &Option<Config>, verbose: u8) {
    let level = match verbose {
        0 => config
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    builder.parse_filters(&level);
    // Plain output when piped, timestamps on a TTY.
    if !atty::is(atty::Stream::Stdout) {
        builder.format_timestamp(None);
    }
    let _ = builder.try_init();
}

async fn start(config: Config) -> Result<()> {
    let store = EntityStore::open(&config.storage.data_dir)?;
    let channels = gateway::channels();
    let engine = Engine::new(
        store,
        channels.outbound_tx.clone(),
        config.game.clone(),
        StdRng::from_entropy(),
    )?
    .with_flavor(Box::new(TemplateFlavor::new(StdRng::from_entropy())));

    let seq_start = engine.store().get_cursor()? + 1;
    let server = ArenaServer::new(engine, channels.inbound_rx, config.gateway.tick_ms);
    info!(
        "console gateway: you are entity {} ({})",
        config.gateway.console_id, config.gateway.console_name
    );

    // Outbound printer.
    let mut outbound_rx = channels.outbound_rx;
    tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            if msg.actions.is_empty() {
                println!("[{}] {}", msg.target, msg.text);
            } else {
                println!("[{}] {} {:?}", msg.target, msg.text, msg.actions);
            }
        }
    });

    // Stdin reader feeding the inbound channel in sequence order.
    let inbound_tx = channels.inbound_tx;
    let console_id = config.gateway.console_id;
    let console_name = config.gateway.console_name.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut seq = seq_start;
        while let Ok(Some(line)) = lines.next_line().await {
            let msg = InboundMessage {
                seq,
                sender_id: console_id,
                sender_name: console_name.clone(),
                text: line,
                timestamp: Utc::now().timestamp(),
            };
            seq += 1;
            if inbound_tx.send(msg).is_err() {
                break;
            }
        }
        // Dropping the sender shuts the server down cleanly.
    });

    server.run().await?;
    Ok(())
}

fn status(config: &Config) -> Result<()> {
    let store = EntityStore::open(&config.storage.data_dir)?;
    let mut humans = 0u32;
    let mut bots = 0u32;
    let mut fighting = 0u32;
    let mut ready = 0u32;
    store.for_each(|entity| {
        if entity.is_bot() {
            bots += 1;
        } else {
            humans += 1;
        }
        match entity.status {
            Status::Fighting => fighting += 1,
            Status::ReadyToFight => ready += 1,
            _ => {}
        }
        Ok(())
    })?;
    let summary = serde_json::json!({
        "data_dir": config.storage.data_dir,
        "humans": humans,
        "bots": bots,
        "fighting": fighting,
        "ready": ready,
        "cursor": store.get_cursor()?,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
