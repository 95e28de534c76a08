//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use value_scout::{
    cli::{Commands, ValueScout},
    commands::{
        analyze::{handle_analyze, AnalyzeParams},
        cache_info::handle_cache_info,
        refresh::{handle_refresh, RefreshParams},
    },
    pipeline::PipelineConfig,
};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "value_scout=debug"
    } else {
        "value_scout=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = ValueScout::parse();
    init_tracing(app.verbose);

    match app.command {
        Commands::Refresh {
            roster,
            extra_roster,
            locations,
            base_url,
            concurrency,
            delay_ms,
            timeout_secs,
            fresh,
        } => {
            let params = RefreshParams {
                roster,
                extra_roster,
                cache_path: locations.cache_path(),
                data_dir: locations.data_dir(),
                base_url,
                pipeline: PipelineConfig {
                    concurrency,
                    batch_delay: Duration::from_millis(delay_ms),
                    fetch_timeout: Some(Duration::from_secs(timeout_secs)),
                },
                fresh,
            };
            let cache_path = params.cache_path.clone();
            handle_refresh(params)
                .await
                .with_context(|| format!("refresh failed (cache: {})", cache_path.display()))?;
        }

        Commands::Analyze {
            locations,
            overpriced,
            metric,
            min_minutes,
            min_comparisons,
            minutes_dominance,
            league,
            club,
            top5,
            limit,
            json,
        } => handle_analyze(AnalyzeParams {
            data_dir: locations.data_dir(),
            overpriced,
            metric,
            min_minutes,
            min_comparisons,
            minutes_dominance,
            league,
            club,
            top5,
            limit,
            as_json: json,
        })
        .context("analysis failed")?,

        Commands::CacheInfo { locations } => handle_cache_info(locations.cache_path())?,
    }

    Ok(())
}
