//! Command line and environment configuration.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use podgen::{
    backends::{MinimaxSpeech, OpenAiChat},
    AudioMerger, ChatModel, VoiceRoster,
};
use podgen_scrape::{FirecrawlClient, WebScraper, DEFAULT_FIRECRAWL_URL};
use tracing::{info, warn};

use crate::state::{AppState, Tts};

/// HTTP API turning web content into Japanese two-host podcasts.
#[derive(Parser, Debug, Clone)]
#[command(name = "podgen")]
#[command(about = "Japanese two-host podcast generation API")]
#[command(version)]
pub struct Args {
    /// Listen address (e.g. :3000, 127.0.0.1:8080)
    #[arg(long, env = "PODGEN_ADDR", default_value = ":3000")]
    pub addr: String,

    /// API key of the OpenAI-compatible chat service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = podgen_openai::DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = podgen_openai::DEFAULT_MODEL)]
    pub openai_model: String,

    /// MiniMax API key; speech is disabled without it
    #[arg(long, env = "MINIMAX_API_KEY", hide_env_values = true)]
    pub minimax_api_key: Option<String>,

    #[arg(long, env = "MINIMAX_API_HOST", default_value = podgen_minimax::BASE_URL_IO)]
    pub minimax_api_host: String,

    #[arg(long, env = "MINIMAX_GROUP_ID")]
    pub minimax_group_id: Option<String>,

    /// Firecrawl API key; pages are fetched directly without it
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    pub firecrawl_api_key: Option<String>,

    #[arg(long, env = "FIRECRAWL_BASE_URL", default_value = DEFAULT_FIRECRAWL_URL)]
    pub firecrawl_base_url: String,

    /// ffmpeg binary used for merging (default: search PATH)
    #[arg(long, env = "FFMPEG_PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the shared application state. Missing keys disable the
    /// features that need them; invalid settings are errors.
    pub fn build_state(&self) -> Result<AppState> {
        let llm: Option<Arc<dyn ChatModel>> = match non_blank(&self.openai_api_key) {
            Some(key) => {
                let client = podgen_openai::Client::builder(key)
                    .base_url(&self.openai_base_url)
                    .model(&self.openai_model)
                    .build()
                    .context("openai client")?;
                info!(
                    base_url = %self.openai_base_url,
                    model = %self.openai_model,
                    "chat model configured"
                );
                Some(Arc::new(OpenAiChat::new(client)))
            }
            None => {
                warn!("OPENAI_API_KEY not set, script generation disabled");
                None
            }
        };

        let tts = match non_blank(&self.minimax_api_key) {
            Some(key) => {
                let mut builder = podgen_minimax::Client::builder(key)
                    .base_url(&self.minimax_api_host)
                    .max_retries(0);
                if let Some(group_id) = non_blank(&self.minimax_group_id) {
                    builder = builder.group_id(group_id);
                }
                let client = builder.build().context("minimax client")?;
                info!(host = %self.minimax_api_host, "speech configured");
                Some(Tts::new(
                    Arc::new(MinimaxSpeech::new(Arc::new(client))),
                    key_preview(key),
                ))
            }
            None => {
                warn!("MINIMAX_API_KEY not set, audio generation disabled");
                None
            }
        };

        let firecrawl = match non_blank(&self.firecrawl_api_key) {
            Some(key) => Some(
                FirecrawlClient::new(key, &self.firecrawl_base_url).context("firecrawl client")?,
            ),
            None => None,
        };
        let scraper = WebScraper::new(firecrawl).context("web scraper")?;
        if !scraper.has_service() {
            info!("FIRECRAWL_API_KEY not set, pages are fetched directly");
        }

        Ok(AppState {
            llm,
            scraper: Arc::new(scraper),
            tts,
            merger: AudioMerger::detect(self.ffmpeg.clone()),
            roster: VoiceRoster::default(),
            minimax_host: self.minimax_api_host.clone(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// First eight characters of a key followed by `...`.
pub fn key_preview(key: &str) -> String {
    format!("{}...", key.chars().take(8).collect::<String>())
}

/// Parses a listen address; a bare `:port` binds all interfaces.
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    addr.parse()
        .with_context(|| format!("invalid listen address: {}", addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["podgen"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parse_addr_accepts_bare_port() {
        assert_eq!(parse_addr(":3000").unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(parse_addr("127.0.0.1:8080").unwrap().port(), 8080);
        assert!(parse_addr("nowhere").is_err());
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let state = args(&["--openai-api-key", "  ", "--minimax-api-key", " "])
            .build_state()
            .unwrap();
        assert!(state.llm.is_none());
        assert!(state.tts.is_none());
    }

    #[test]
    fn keys_enable_services() {
        let state = args(&["--openai-api-key", "sk-test", "--minimax-api-key", "mm-0123456789"])
            .build_state()
            .unwrap();
        assert!(state.llm.is_some());
        assert_eq!(state.tts.unwrap().api_key_preview, "mm-01234...");
    }
}
