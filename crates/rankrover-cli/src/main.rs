use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rankrover_core::{AppConfig, TrackReport};
use rankrover_llm::ChatClient;
use rankrover_serpapi::SerpApiClient;

#[derive(Debug, Parser)]
#[command(name = "rankrover-cli")]
#[command(about = "RankRover brand-visibility tracking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct TrackArgs {
    /// Keyword to expand into queries or prompts.
    #[arg(long)]
    keyword: String,

    /// Brand name to locate in each document.
    #[arg(long)]
    brand: String,

    /// Documents to collect; defaults to `RANKROVER_SEARCH_COUNT`.
    #[arg(long)]
    count: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Track the brand in Google AI Overviews via SerpAPI.
    Search(TrackArgs),
    /// Track the brand in ChatGPT answers.
    Chatgpt(TrackArgs),
    /// Track the brand in DeepSeek answers.
    Deepseek(TrackArgs),
}

enum ChatProvider {
    OpenAi,
    DeepSeek,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = rankrover_core::load_app_config()?;

    let report = match cli.command {
        Commands::Search(args) => run_search(&config, &args).await?,
        Commands::Chatgpt(args) => run_chat(&config, &args, &ChatProvider::OpenAi).await?,
        Commands::Deepseek(args) => run_chat(&config, &args, &ChatProvider::DeepSeek).await?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_search(config: &AppConfig, args: &TrackArgs) -> anyhow::Result<TrackReport> {
    let key = config
        .serpapi_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("SERPAPI_KEY is not set"))?;
    let client = SerpApiClient::new(key, config.request_timeout_secs)?;

    let options = rankrover_serpapi::TrackingOptions {
        count: args.count.unwrap_or(config.tracker_search_count),
        max_retries: config.tracker_max_retries,
        backoff_base_ms: config.tracker_retry_backoff_base_ms,
    };

    let mut rng = StdRng::from_os_rng();
    let report =
        rankrover_serpapi::run_search_tracking(&client, &args.keyword, &args.brand, options, &mut rng)
            .await?;
    Ok(report)
}

async fn run_chat(
    config: &AppConfig,
    args: &TrackArgs,
    provider: &ChatProvider,
) -> anyhow::Result<TrackReport> {
    let client = match provider {
        ChatProvider::OpenAi => {
            let key = config
                .openai_api_key
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;
            ChatClient::openai(key, config.request_timeout_secs)?
        }
        ChatProvider::DeepSeek => {
            let key = config
                .deepseek_api_key
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DEEPSEEK_API_KEY is not set"))?;
            ChatClient::deepseek(key, config.request_timeout_secs)?
        }
    };

    let options = rankrover_llm::TrackingOptions {
        count: args.count.unwrap_or(config.tracker_search_count),
        max_retries: config.tracker_max_retries,
        backoff_base_ms: config.tracker_retry_backoff_base_ms,
    };

    let mut rng = StdRng::from_os_rng();
    let report =
        rankrover_llm::run_chat_tracking(&client, &args.keyword, &args.brand, options, &mut rng)
            .await;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_command() {
        let cli = Cli::try_parse_from([
            "rankrover-cli",
            "search",
            "--keyword",
            "widgets",
            "--brand",
            "Acme",
            "--count",
            "5",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.keyword, "widgets");
                assert_eq!(args.brand, "Acme");
                assert_eq!(args.count, Some(5));
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }

    #[test]
    fn count_is_optional() {
        let cli = Cli::try_parse_from([
            "rankrover-cli",
            "deepseek",
            "--keyword",
            "widgets",
            "--brand",
            "Acme",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Deepseek(args) => assert_eq!(args.count, None),
            other => panic!("expected deepseek command, got {other:?}"),
        }
    }

    #[test]
    fn missing_brand_is_rejected() {
        let result =
            Cli::try_parse_from(["rankrover-cli", "chatgpt", "--keyword", "widgets"]);
        assert!(result.is_err());
    }
}
