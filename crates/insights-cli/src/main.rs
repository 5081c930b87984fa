use clap::{CommandFactory, Parser, Subcommand};
use insights_core::{AppConfig, BrandContext, FailurePolicies};
use insights_scraper::{InsightsFetcher, StorefrontClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "insights-cli")]
#[command(about = "Fetch structured brand insights from a Shopify storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch insights for one storefront and print them as JSON
    Fetch {
        /// Store URL, with or without scheme (e.g. `examplebrand.myshopify.com`)
        url: String,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Print the failure policy in effect for each field
    Policies,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = insights_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Fetch { url, compact }) => {
            let context = fetch(&config, &url).await?;
            println!("{}", render_context(&context, compact)?);
        }
        Some(Commands::Policies) => print!("{}", render_policies(&config.failure_policies)),
        None => Cli::command().print_help()?,
    }

    Ok(())
}

async fn fetch(config: &AppConfig, url: &str) -> anyhow::Result<BrandContext> {
    let client = StorefrontClient::from_config(config)?;
    let fetcher = InsightsFetcher::new(client, config.failure_policies.clone());

    tracing::info!(url, "fetching brand insights");
    match fetcher.fetch(url).await {
        Ok(context) => {
            tracing::info!(
                url,
                products = context.products.len(),
                faqs = context.faqs.len(),
                "fetch complete"
            );
            Ok(context)
        }
        Err(e) if e.is_unreachable() => {
            tracing::error!(url, error = %e, "website unreachable");
            anyhow::bail!("website not found or inaccessible: {e}")
        }
        Err(e) => {
            tracing::error!(url, error = %e, "fetch failed");
            Err(anyhow::Error::new(e).context(format!("internal error fetching {url}")))
        }
    }
}

fn render_context(context: &BrandContext, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(context)
    } else {
        serde_json::to_string_pretty(context)
    }
}

fn render_policies(policies: &FailurePolicies) -> String {
    policies
        .iter()
        .map(|(field, policy)| format!("{field:<22}{policy}\n"))
        .collect()
}
