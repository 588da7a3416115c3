mod display;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use pactlens_ai::{HttpProvider, HttpProviderConfig, MockProvider, ReasoningProvider};
use pactlens_core::SegmenterConfig;
use pactlens_pipeline::{Pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

use crate::display::{Card, source_label};

#[derive(Parser)]
#[command(name = "pactlens")]
#[command(about = "Analyse legal document text for obligations, rights and red flags")]
#[command(version)]
struct Cli {
    /// Text file to analyse; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// External reasoning provider
    #[arg(long, env = "PACTLENS_PROVIDER", value_enum, default_value_t = ProviderKind::None)]
    provider: ProviderKind,

    /// Chat-completions endpoint root for the http provider
    #[arg(long, env = "PACTLENS_BASE_URL", default_value = pactlens_ai::http::DEFAULT_BASE_URL)]
    base_url: String,

    /// Model name for the http provider
    #[arg(long, env = "PACTLENS_MODEL", default_value = pactlens_ai::http::DEFAULT_MODEL)]
    model: String,

    /// API token for the http provider
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    api_key: Option<String>,

    /// Provider call timeout in seconds
    #[arg(long, env = "PACTLENS_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Keep at most 15 clauses and skip fragments under 20 characters
    #[arg(long)]
    compact: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    /// Rule-based stages only
    None,
    /// Offline keyword heuristic
    Mock,
    /// OpenAI-compatible chat completions
    Http,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Card,
}

impl Cli {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let segmenter = if self.compact {
            SegmenterConfig::COMPACT
        } else {
            SegmenterConfig::STANDARD
        };
        PipelineConfig::new(segmenter, Duration::from_secs(self.timeout_secs))
            .context("invalid pipeline configuration")
    }

    fn provider(&self) -> anyhow::Result<Option<Arc<dyn ReasoningProvider>>> {
        let provider: Arc<dyn ReasoningProvider> = match self.provider {
            ProviderKind::None => return Ok(None),
            ProviderKind::Mock => Arc::new(MockProvider::heuristic()),
            ProviderKind::Http => {
                let Some(api_key) = self.api_key.clone() else {
                    bail!("--provider http needs an API token (--api-key or HF_TOKEN)");
                };
                let mut config = HttpProviderConfig::new(api_key);
                config.base_url = self.base_url.clone();
                config.model = self.model.clone();
                Arc::new(HttpProvider::new(config))
            }
        };
        Ok(Some(provider))
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("pactlens v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.pipeline_config()?;
    let pipeline = match cli.provider()? {
        Some(provider) => {
            tracing::info!(provider = provider.name(), "external reasoning enabled");
            Pipeline::with_provider(config, provider)
        }
        None => Pipeline::new(config),
    };

    let text = cli.read_input()?;
    let analysis = pipeline.analyze(&text).await.context("analysis failed")?;
    let source = source_label(&analysis.source);
    if analysis.is_fallback() {
        tracing::warn!(source = %source, "report built by rule-based fallback");
    } else {
        tracing::info!(source = %source, "report source");
    }

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis.report)?;
            println!("{json}");
        }
        OutputFormat::Card => print!("{}", Card(&analysis)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn compact_flag_selects_compact_segmenter() {
        let cli = Cli::parse_from(["pactlens", "--compact", "--timeout-secs", "5", "doc.txt"]);
        let config = cli.pipeline_config().unwrap();
        assert_eq!(*config.segmenter(), SegmenterConfig::COMPACT);
        assert_eq!(config.provider_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = Cli::parse_from(["pactlens", "--timeout-secs", "0"]);
        assert!(cli.pipeline_config().is_err());
    }

    #[test]
    fn mock_provider_needs_no_token() {
        let cli = Cli::parse_from(["pactlens", "--provider", "mock"]);
        let provider = cli.provider().unwrap().unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn http_provider_uses_flags() {
        let cli = Cli::parse_from([
            "pactlens",
            "--provider",
            "http",
            "--api-key",
            "secret",
            "--model",
            "local-model",
        ]);
        let provider = cli.provider().unwrap().unwrap();
        assert_eq!(provider.name(), "local-model");
    }
}
