// Command-line entry point for decision-maker discovery

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use decision_makers::providers::{FirecrawlClient, OpenAIExtractor};
use decision_makers::{DecisionMakerPlanner, DiscoveryConfig, DiscoveryContext, Field};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Find a company's decision makers and other requested fields.
#[derive(Parser, Debug)]
#[command(name = "discover", version)]
struct Cli {
    /// Company name
    #[arg(long)]
    company: Option<String>,

    /// Company domain (e.g. acme.com)
    #[arg(long)]
    domain: Option<String>,

    /// Requested field as name=description (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<Field>,

    /// JSON file with an array of {"name", "description"} fields
    #[arg(long)]
    fields_file: Option<PathBuf>,

    /// Year used in recency-marked queries (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Print the query plan without collecting evidence or extracting
    #[arg(long)]
    dry_run: bool,
}

fn parse_field(raw: &str) -> std::result::Result<Field, String> {
    let (name, description) = raw.split_once('=').unwrap_or((raw, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok(Field::new(name, description.trim()))
}

/// Provider configuration loaded from environment variables
#[derive(Debug, Clone)]
struct Config {
    firecrawl_api_key: String,
    firecrawl_api_url: Option<String>,
    openai_api_key: Option<String>,
    openai_model: String,
}

impl Config {
    fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Ok(Self {
            firecrawl_api_key: std::env::var("FIRECRAWL_API_KEY")
                .context("FIRECRAWL_API_KEY must be set")?,
            firecrawl_api_url: std::env::var("FIRECRAWL_API_URL").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
        })
    }
}

fn load_fields(cli: &Cli) -> Result<Vec<Field>> {
    let mut fields = cli.fields.clone();

    if let Some(path) = &cli.fields_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let from_file: Vec<Field> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fields from {}", path.display()))?;
        fields.extend(from_file);
    }

    anyhow::ensure!(!fields.is_empty(), "at least one --field or --fields-file is required");
    Ok(fields)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,decision_makers=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let fields = load_fields(&cli)?;
    let config = Config::from_env().context("Failed to load configuration")?;

    let mut context = DiscoveryContext::new();
    if let Some(company) = &cli.company {
        context = context.with_company_name(company);
    }
    if let Some(domain) = &cli.domain {
        context = context.with_company_domain(domain);
    }

    let mut firecrawl = FirecrawlClient::new(config.firecrawl_api_key.clone())
        .context("Failed to build Firecrawl client")?;
    if let Some(url) = &config.firecrawl_api_url {
        firecrawl = firecrawl.with_base_url(url);
    }

    let discovery_config = DiscoveryConfig::default();

    if cli.dry_run {
        let mut planner =
            DecisionMakerPlanner::planning_only(firecrawl).with_config(discovery_config);
        if let Some(year) = cli.year {
            planner = planner.with_year(year);
        }

        let plan = planner.plan(&fields, &context).await;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let openai_api_key = config
        .openai_api_key
        .clone()
        .context("OPENAI_API_KEY must be set")?;
    let extractor = OpenAIExtractor::new(openai_api_key).with_model(&config.openai_model);

    let mut planner = DecisionMakerPlanner::new(firecrawl.clone(), firecrawl, extractor)
        .with_config(discovery_config);
    if let Some(year) = cli.year {
        planner = planner.with_year(year);
    }

    tracing::info!(fields = fields.len(), "Starting discovery");
    let results = planner.execute(&fields, &context).await;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        let field = parse_field("ceo=Chief Executive Officer").unwrap();
        assert_eq!(field.name, "ceo");
        assert_eq!(field.description, "Chief Executive Officer");

        assert_eq!(parse_field("founder").unwrap().description, "");
        assert!(parse_field("=nameless").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_fields() {
        let cli = Cli::try_parse_from([
            "discover",
            "--company",
            "Acme Corp",
            "--field",
            "ceo=Chief Executive Officer",
            "--field",
            "industry=Primary industry",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.fields.len(), 2);
        assert!(cli.dry_run);
        assert_eq!(load_fields(&cli).unwrap().len(), 2);
    }
}
