//! Farm survey dashboard entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use agri_core::events::{handler_from_fn, DataLoadFailed, DataLoaded, Event};
use agri_core::{DashboardState, FilterContext, FilterLevel, FilterSubscriber};
use agri_views::export::export_tables;
use agri_views::Dashboard;

mod cli;
mod report;

use cli::{CliArgs, OutputFormat};
use report::DomainReport;

/// Logs every filter change
struct FilterLog;

impl FilterSubscriber for FilterLog {
    fn on_filter_change(&self, context: &FilterContext) {
        debug!(
            "{} filter is now {} / {} / {}",
            context.domain,
            context.selection.region,
            context.selection.subregion,
            context.selection.locality
        );
    }
}

fn register_event_logging(state: &DashboardState) {
    state.event_bus.subscribe::<DataLoaded>(handler_from_fn(|event| {
        if let Some(loaded) = event.as_any().downcast_ref::<DataLoaded>() {
            info!(
                "Data loaded from {}: {} farmers, {} crops, {} livestock, {} aquaculture",
                loaded.source_name, loaded.people, loaded.crops, loaded.livestock, loaded.aquaculture
            );
        }
    }));
    state.event_bus.subscribe::<DataLoadFailed>(handler_from_fn(|event| {
        if let Some(failed) = event.as_any().downcast_ref::<DataLoadFailed>() {
            error!("Data load from {} failed: {}", failed.source_name, failed.error);
        }
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.resolve()?;
    info!("Starting farmdash with {:?}", config.source);

    let state = Arc::new(DashboardState::new());
    register_event_logging(&state);
    let filter_log: Arc<dyn FilterSubscriber> = Arc::new(FilterLog);
    state.add_subscriber(filter_log.clone());

    let source = config.source.build()?;
    state
        .load(source.as_ref())
        .await
        .context("could not load survey data")?;

    let mut dashboard = Dashboard::with_cache_entries(state, config.cache_entries);
    if let Some(year) = args.year {
        dashboard = dashboard.with_current_year(year);
    }

    let mut reports = Vec::new();
    for domain in args.domains() {
        let levels = [
            (FilterLevel::Region, &args.region),
            (FilterLevel::Subregion, &args.subregion),
            (FilterLevel::Locality, &args.locality),
        ];
        for (level, value) in levels {
            if let Some(value) = value {
                dashboard.set_filter(domain, level, value.clone());
            }
        }

        let report = DomainReport::build(&dashboard, domain)?;
        if let Some(dir) = &args.export {
            export_tables(&dir.join(domain.as_str()), &report.tables)?;
        }
        reports.push(report);
    }

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.render_text(args.page, config.page_size));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
