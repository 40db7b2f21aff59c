use clap::Parser;
use farm_dashboard::{browse, cache, cli, config, dashboard, error, export, fetcher, progress, report, server, source};
use farm_dashboard_common::{is_well_formed_url, Dataset, Notice, QueryParams, Selection};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use fetcher::HttpImageFetcher;
use source::DataSource;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✖ {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => "farm_dashboard=debug,farm_dashboard_common=debug,tower_http=debug",
        (Commands::Serve { .. }, false) => "farm_dashboard=info,farm_dashboard_common=info,tower_http=info",
        _ => "farm_dashboard=warn,farm_dashboard_common=error",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let source = DataSource::parse(&config.resolve_source(cli.source.as_deref()));

    match cli.command {
        Commands::Farms => {
            let dataset = load_dataset(&source, &config).await?;
            let directory = dataset.directory();
            if directory.is_empty() {
                println!("No farms found in {source}");
            }
            for farm in directory.farms() {
                println!("{farm}");
            }
        }

        Commands::Show { farm_name, severity, output } => {
            let dataset = load_dataset(&source, &config).await?;
            let params = QueryParams::new(farm_name.as_deref(), severity.as_deref());
            let outcome = dataset.select(&params);
            show_selection(&dataset, outcome.selection, outcome.notices, &config, output.as_deref()).await?;
        }

        Commands::Browse { farm_name, severity, output } => {
            let dataset = load_dataset(&source, &config).await?;
            let params = QueryParams::new(farm_name.as_deref(), severity.as_deref());
            let selection = browse::prompt_selection(&dataset, &params)?;
            show_selection(&dataset, Some(selection), Vec::new(), &config, output.as_deref()).await?;
        }

        Commands::Serve { host, port } => {
            let client = config.http_client()?;
            let cache = cache::DatasetCache::new(source, client.clone());

            // warm the cache; a failure is rendered on the page instead
            if let Err(e) = cache.get().await {
                tracing::error!(error = %e, "initial dataset load failed");
            }

            let state = Arc::new(server::AppState::new(cache, HttpImageFetcher::new(client)));
            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);
            server::serve(state, &host, port).await?;
        }

        Commands::Config { set_source, show } => {
            let mut config = config;

            if let Some(source) = set_source {
                config.set_data_source(source)?;
                println!("✔ Data source saved");
            }

            if show {
                println!("Configuration ({}):", Config::config_path()?.display());
                println!("  Data source: {}", config.data_source);
                println!("  Address: {}:{}", config.host, config.port);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  User agent: {}", config.user_agent);
            }
        }
    }

    Ok(())
}

async fn load_dataset(source: &DataSource, config: &Config) -> Result<Dataset> {
    let client = config.http_client()?;
    source.load(&client).await
}

async fn show_selection(
    dataset: &Dataset,
    selection: Option<Selection>,
    notices: Vec<Notice>,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let fetcher = HttpImageFetcher::new(config.http_client()?);

    let fetches = selection
        .as_ref()
        .map(|s| {
            dataset
                .slice(s)
                .iter()
                .filter(|r| r.image_url.as_deref().is_some_and(is_well_formed_url))
                .count()
        })
        .unwrap_or(0);

    let progress = progress::ProgressFetcher::new(&fetcher, fetches as u64);
    let pass = dashboard::present_selection(dataset, selection, notices, &progress).await;
    progress.finish();

    print!(
        "{}",
        report::render_report(pass.selection.as_ref(), &pass.notices, &pass.presentation)
    );

    if let Some(output_dir) = output {
        let summary = export::export_downloads(&pass.presentation.downloads, output_dir)?;
        match summary.archive {
            Some(archive) => {
                println!("✔ {} image(s) written to {}", summary.images.len(), output_dir.display());
                println!("✔ Archive: {}", archive.display());
            }
            None => println!("No images to download for the selected filters."),
        }
    }

    Ok(())
}
