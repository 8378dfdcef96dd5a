//! DorkRecon command line entry point
//!
//! Thin collaborator over the core library: builds a validated search
//! request from arguments, renders progress lines verbatim, replaces
//! its displayed batch on completion, and gates export on a non-empty
//! batch.

use anyhow::{bail, Result};
use dork_recon::{
    config::Settings,
    dispatch::{CurrentBatch, Dispatcher, SearchEvent, SearchRequest},
    export::{self, ExportFormat},
    network::HttpClient,
    templates, Backend,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    query: Option<String>,
    backend: Backend,
    limit: Option<u32>,
    api_key: Option<String>,
    csv_path: Option<String>,
    json_path: Option<String>,
    list_dorks: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings()?;

    let filter = if settings.general.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting DorkRecon v{}", dork_recon::VERSION);

    let args = parse_args(std::env::args().skip(1).collect())?;

    if args.list_dorks {
        let dorks = templates::load_templates(&settings.search.dorks_file)?;
        for dork in dorks {
            println!("{}", dork);
        }
        return Ok(());
    }

    let query = match args.query {
        Some(q) => q,
        None => bail!("usage: dork-recon [--backend ddg|external] [--limit N] [--api-key KEY] [--csv PATH] [--json PATH] [--dorks] <QUERY>"),
    };

    let mut request = SearchRequest::new(query, args.backend)
        .with_limit(args.limit.unwrap_or(settings.search.default_limit));
    let api_key = args
        .api_key
        .or_else(|| std::env::var("DORKRECON_API_KEY").ok());
    if let Some(key) = api_key {
        request = request.with_credential(key);
    }

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let (dispatcher, mut events) = Dispatcher::new(client, &settings);

    let mut current = CurrentBatch::new();
    let id = dispatcher.submit(request)?;
    current.track(id);

    while let Some(event) = events.recv().await {
        if !current.accept(&event) {
            continue;
        }
        match event {
            SearchEvent::Progress { status, .. } => println!("{}", status),
            SearchEvent::Completed { .. } => break,
        }
    }

    let batch = match current.batch() {
        Some(batch) => batch,
        None => bail!("search ended without a completion event"),
    };

    for record in batch.iter() {
        println!("Title: {}\nURL: {}\n---", record.title, record.url);
    }

    if args.csv_path.is_some() || args.json_path.is_some() {
        if batch.is_empty() {
            println!("No search results to export.");
            return Ok(());
        }
        if let Some(path) = args.csv_path {
            export::write_batch(&batch.records, ExportFormat::Csv, &path)?;
            println!("Results exported to {}", path);
        }
        if let Some(path) = args.json_path {
            export::write_batch(&batch.records, ExportFormat::Json, &path)?;
            println!("Results exported to {}", path);
        }
    }

    Ok(())
}

fn parse_args(argv: Vec<String>) -> Result<Args> {
    let mut args = Args {
        query: None,
        backend: Backend::DuckDuckGo,
        limit: None,
        api_key: None,
        csv_path: None,
        json_path: None,
        list_dorks: false,
    };

    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--backend" => {
                let value = iter.next().ok_or_else(|| missing_value("--backend"))?;
                args.backend = value.parse().map_err(anyhow::Error::msg)?;
            }
            "--limit" => {
                let value = iter.next().ok_or_else(|| missing_value("--limit"))?;
                args.limit = Some(value.parse()?);
            }
            "--api-key" => {
                args.api_key = Some(iter.next().ok_or_else(|| missing_value("--api-key"))?);
            }
            "--csv" => {
                args.csv_path = Some(iter.next().ok_or_else(|| missing_value("--csv"))?);
            }
            "--json" => {
                args.json_path = Some(iter.next().ok_or_else(|| missing_value("--json"))?);
            }
            "--dorks" => args.list_dorks = true,
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            _ => args.query = Some(arg),
        }
    }

    Ok(args)
}

fn missing_value(option: &str) -> anyhow::Error {
    anyhow::anyhow!("{} requires a value", option)
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    if let Ok(path) = std::env::var("DORKRECON_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    let paths = [
        PathBuf::from("settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("dork-recon/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in &paths {
        if path.exists() {
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
