use std::sync::Arc;

use anyhow::{Context, Result, bail};
use asset_browser::config::BrowserConfig;
use asset_browser::{
    CatalogController,
    CatalogState,
    ConfigSource,
    HttpConfigProvider,
    Phase,
    PluginConfig,
    StaticConfigProvider,
    UrlNavigator,
};
use asset_catalog::SearchField;
use clap::Parser;
use tracing::{debug, info};
use utils::init::{Verbosity, init_catalog_client, init_logger};

mod utils;

/// Browse the media asset catalog from the command line
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Asset list endpoint of the catalog
    #[arg(long)]
    catalog_url: Option<String>,

    /// Endpoint serving the plugin configuration
    #[arg(long)]
    config_url: Option<String>,

    /// Catalog API token, the plugin configuration is not fetched when given
    #[arg(long)]
    api_token: Option<String>,

    /// Field the search is scoped to
    #[arg(long, default_value_t = SearchField::ByTitle)]
    field: SearchField,

    /// Search for assets instead of listing the catalog
    #[arg(long)]
    search: Option<String>,

    /// Load this many pages after the first one
    #[arg(long, default_value_t = 0)]
    load_more: u32,

    /// Print the browser state as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut BrowserConfig) {
        if let Some(url) = &self.catalog_url {
            config.catalog_url = url.clone();
        }
        if let Some(url) = &self.config_url {
            config.config_url = url.clone();
        }
        if let Some(token) = &self.api_token {
            config.api_token = Some(token.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(Verbosity::from_flags(cli.quiet, cli.verbose));

    let mut config = BrowserConfig::parse().context("failed to read configuration")?;
    cli.apply_overrides(&mut config);
    debug!(?config, "configuration loaded");

    let client = init_catalog_client(&config)?;
    let provider = match &config.api_token {
        Some(token) => {
            ConfigSource::from(StaticConfigProvider::new(PluginConfig::with_token(token)))
        },
        None => ConfigSource::from(
            HttpConfigProvider::new(config.config_url.clone(), config.admin_token.as_deref())
                .context("failed to create configuration client")?,
        ),
    };
    let navigator = Arc::new(UrlNavigator::new(config.location.clone()));
    let controller =
        CatalogController::new(client, navigator.clone(), config.controller_settings());

    controller.mount(&provider).await;
    if controller.state().phase == Phase::AwaitingConfig {
        bail!(
            "no catalog API token available, check the plugin configuration at {}",
            config.config_url
        );
    }

    for _ in 0..cli.load_more {
        if !controller.state().can_load_more() {
            info!("reached the last page");
            break;
        }
        controller.load_more().await;
    }

    if let Some(value) = cli.search.as_deref().filter(|value| !value.is_empty()) {
        let mut updates = controller.subscribe();
        controller.set_search_field(cli.field);
        controller.set_search_value(value);
        updates
            .wait_for(|state| !state.is_loading())
            .await
            .context("controller stopped before the search completed")?;
        debug!(location = %navigator.location(), "search finished");
    }

    let state = controller.state();
    print_state(&state, cli.json)?;

    if let Some(failure) = &state.last_failure {
        bail!("failed to load assets: {}", failure.message);
    }
    Ok(())
}

fn print_state(state: &CatalogState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    for asset in &state.items {
        println!("{}\t{}", asset.rid, asset.label());
    }
    if state.has_more {
        info!(
            page = state.current_page - 1,
            total_pages = state.total_pages,
            "more assets available, pass --load-more to list them"
        );
    }
    Ok(())
}
