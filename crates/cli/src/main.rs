mod media_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    courier_media::{MediaConfig, classify, placeholder_for},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "courier", about = "Courier: inbound media resolver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Media config file (TOML).
    #[arg(long, global = true, env = "COURIER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and store a message attachment, then print records and payload.
    Resolve(media_commands::ResolveArgs),
    /// Print the media category of a MIME type.
    Classify { mime: String },
    /// Print the placeholder token for a message type.
    Placeholder { message_type: String },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MediaConfig> {
    match path {
        Some(path) => MediaConfig::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {e}", path.display())),
        None => Ok(MediaConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    match cli.command {
        Commands::Resolve(args) => {
            let config = load_config(cli.config.as_ref())?;
            media_commands::handle_resolve(args, config).await
        },
        Commands::Classify { mime } => {
            println!("{}", classify(&mime));
            Ok(())
        },
        Commands::Placeholder { message_type } => {
            println!("{}", placeholder_for(&message_type));
            Ok(())
        },
    }
}
