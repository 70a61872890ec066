//! prospector - ICP-driven Apollo.io prospect search.
//!
//! Loads an Ideal Customer Profile, translates it into Apollo search
//! parameters, runs the two-step organization/people workflow and persists
//! the full results as JSON next to the bounded console output.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use icp_prospector::apollo::ApolloClient;
use icp_prospector::config::Config;
use icp_prospector::icp::IcpConfig;
use icp_prospector::input::{self, FileFormat, InputData};
use icp_prospector::mapper::{self, Tier};
use icp_prospector::models::SearchOutcome;
use icp_prospector::output;

#[derive(Parser, Debug)]
#[command(name = "prospector", about = "Search Apollo.io for organizations and people matching an ICP")]
struct Args {
    /// Path to the ICP configuration file
    #[arg(long, default_value = "data/icp_config.yaml")]
    config: PathBuf,

    /// Expected format of the configuration file
    #[arg(long, value_enum, default_value_t = FileFormat::Yaml)]
    format: FileFormat,

    /// Apollo plan tier; the free tier only supports a reduced filter set
    #[arg(long, value_enum, default_value_t = Tier::Premium)]
    tier: Tier,

    /// Override the APOLLO_MAX_PAGES page cap for this run
    #[arg(long)]
    max_pages: Option<u32>,

    /// Directory for the JSON result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip the direct people search (step 2)
    #[arg(long)]
    skip_people: bool,

    /// Skip per-organization people enrichment
    #[arg(long)]
    skip_enrichment: bool,

    /// Verify the API key against /auth/health and exit
    #[arg(long)]
    health_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();
    let args = Args::parse();

    let config = Config::from_env().context("Configuration error")?;

    let client = ApolloClient::new(&config.api_key)?
        .with_base_url(&config.api_base)
        .with_delays(
            Duration::from_millis(config.page_delay_ms),
            Duration::from_millis(config.enrich_delay_ms),
        );

    if args.health_check {
        if client.check_health().await? {
            println!("✓ Apollo API key is valid");
            return Ok(());
        }
        println!("✗ Apollo API key was rejected");
        std::process::exit(1);
    }

    let icp = load_icp(&args.config, args.format)?;
    output::print_icp_summary(&icp);

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    // Step 1: organizations matching the profile.
    let max_pages = args.max_pages.unwrap_or(config.max_pages);
    let org_params = mapper::org_search_params(&icp, args.tier);
    output::print_org_filters(&icp, &org_params);

    let org_results = client.search_organizations(&org_params, max_pages).await;
    output::print_organizations(&org_results);

    let org_path = args.output_dir.join("apollo_organizations_results.json");
    output::save_json(&org_path, &org_results)?;
    info!("Organization results saved to {}", org_path.display());

    let mut people_found = 0usize;

    // Step 2: direct people search across the whole profile (premium only).
    if !args.skip_people && args.tier == Tier::Premium {
        let people_params = mapper::people_search_params(&icp);
        let outcome = client.search_people(&people_params).await;
        output::print_people_search(&outcome);

        if let SearchOutcome::Success(data) = &outcome {
            people_found += data.people.len();
        }
        let path = args.output_dir.join("apollo_people_search_results.json");
        output::save_json(&path, &outcome)?;
        info!("People search results saved to {}", path.display());
    }

    // Enrichment: people pulled from the top matched organizations.
    if !args.skip_enrichment && !org_results.organizations.is_empty() {
        let titles = mapper::enrichment_titles(&icp.signals);
        let people = client
            .enrich_people_from_organizations(
                &org_results.organizations,
                &titles,
                config.enrich_org_limit,
            )
            .await;
        output::print_people(&people);
        people_found += people.len();

        let path = args.output_dir.join("apollo_people_results.json");
        output::save_json(&path, &people)?;
        info!("Enriched people saved to {}", path.display());
    }

    output::print_run_summary(&icp, &org_results, people_found);
    Ok(())
}

fn load_icp(path: &Path, format: FileFormat) -> Result<IcpConfig> {
    match input::read_input(path, Some(format))? {
        InputData::Structured(value) => {
            let icp = serde_yaml::from_value(value)
                .context("ICP configuration has an unexpected shape")?;
            Ok(icp)
        }
        InputData::Rows(_) | InputData::Text(_) => {
            bail!("ICP configuration must be a YAML mapping, not {}", format)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icp_prospector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate root .env (common when running with
    // --manifest-path from elsewhere).
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidates = [manifest_dir.join(".env"), manifest_dir.join("../.env")];

    for p in candidates {
        if p.exists() {
            let _ = dotenv::from_path(&p);
        }
    }
}
