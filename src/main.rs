use anyhow::{Context, Result};
use company_fields::{
    fetch, logging, Config, Container, FieldContainer, FormPopulator, PopulateOutcome,
};
use std::{
    env,
    sync::{Arc, Mutex},
};
use tracing::{info, warn};

/// `company-fields <count> [--json]`
///
/// Renders the field pairs for `count` to stdout, as an HTML fragment or as
/// JSON. Source and parse mode come from `Config::load`.
#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut args = env::args().skip(1);
    let raw = args
        .next()
        .context("usage: company-fields <count> [--json]")?;
    let as_json = args.any(|a| a == "--json");

    let config = Config::load().context("loading configuration")?;
    info!(?config, "startup");

    let source = fetch::source_from_config(&config)?;
    let container = Arc::new(Mutex::new(FieldContainer::new()));
    let populator = FormPopulator::new(source, container.clone())
        .with_parse_mode(config.parse_mode)
        .with_max_pairs(config.max_pairs);

    match populator.on_count_input(&raw).await {
        PopulateOutcome::Rendered { pairs, names } => {
            info!(pairs, names, "rendered");
        }
        other => warn!(outcome = ?other, raw = %raw, "no fields rendered"),
    }

    let container = container
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if as_json {
        println!("{}", serde_json::to_string_pretty(&*container)?);
    } else {
        print!("{}", container.render_html());
    }
    info!(children = container.children().len(), "done");

    Ok(())
}
