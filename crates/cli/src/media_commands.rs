//! `courier resolve`: run one message through the media pipeline.

use std::path::PathBuf;

use {
    anyhow::{Context, Result, bail},
    clap::Args,
    courier_media::{
        InboundMessage, MediaCapabilities, MediaConfig, MediaResolver, build_media_payload,
    },
    tokio_util::sync::CancellationToken,
    tracing::{info, warn},
};

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Remote media URL.
    #[arg(long, conflicts_with = "message")]
    url: Option<String>,
    /// Message type (image, voice, audio, file, ...).
    #[arg(long = "type", default_value = "file", conflicts_with = "message")]
    message_type: String,
    /// Content type declared by the sender.
    #[arg(long, conflicts_with = "message")]
    mime: Option<String>,
    /// Read the inbound message from a JSON file instead.
    #[arg(long)]
    message: Option<PathBuf>,
    /// Byte budget (overrides config).
    #[arg(long)]
    max_bytes: Option<u64>,
    /// Media store root (overrides config).
    #[arg(long)]
    media_dir: Option<PathBuf>,
    /// Request deadline in seconds (overrides config).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl ResolveArgs {
    fn apply(&self, mut config: MediaConfig) -> Result<MediaConfig> {
        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(dir) = &self.media_dir {
            config.media_dir = dir.clone();
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        config.validate()?;
        Ok(config)
    }

    fn message(&self) -> Result<InboundMessage> {
        if let Some(path) = &self.message {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("invalid message JSON in {}", path.display()));
        }
        let Some(url) = &self.url else {
            bail!("either --url or --message is required");
        };
        let mut message = InboundMessage::new(&self.message_type).with_media_url(url);
        message.mime_type = self.mime.clone();
        Ok(message)
    }
}

pub async fn handle_resolve(args: ResolveArgs, config: MediaConfig) -> Result<()> {
    let config = args.apply(config)?;
    let message = args.message()?;

    let resolver =
        MediaResolver::from_config(&config, MediaCapabilities::local(&config.media_dir))?
            .with_log_sink(|line| info!("{line}"));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling download");
            on_signal.cancel();
        }
    });

    let media = resolver
        .resolve_with_cancel(&message, config.max_bytes, &cancel)
        .await;
    let payload = build_media_payload(&media);

    let output = serde_json::json!({ "media": media, "payload": payload });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
