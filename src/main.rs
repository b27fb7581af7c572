//! Wiring & DI. Entry point: parse the command line, bootstrap adapters, inject into services.
//! No business logic here.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use sportsprep::adapters::archive::ZipExtractor;
use sportsprep::adapters::geo::GeoJsonFile;
use sportsprep::adapters::http::ReqwestHttp;
use sportsprep::adapters::persistence::SqliteStore;
use sportsprep::adapters::tables::CsvTable;
use sportsprep::adapters::ui::{FirstLinkChooser, PromptLinkChooser};
use sportsprep::adapters::wiki::default_pages;
use sportsprep::ports::{
    ArchivePort, GeoJsonPort, HttpPort, LinkChooser, RecordStorePort, TablePort,
};
use sportsprep::shared::config::AppConfig;
use sportsprep::usecases::{DEFAULT_IDS_COLUMN, F1Service, GeoService, GeoSources, ScrapeService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sportsprep", version, about = "Data-preparation tools for sports analyses", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report team geo labels that match no boundary, and the sovereigns drawn by map unit
    CheckGeo {
        sovereign_geojson: PathBuf,
        map_unit_geojson: PathBuf,
        team_csv: PathBuf,
        /// Team CSV column holding the geo label
        #[arg(short = 'g', long)]
        geo_column: Option<String>,
        /// Fail when any label is unresolved
        #[arg(long)]
        strict: bool,
    },
    /// Write the compound boundary map for the teams
    Makegeo {
        sovereign_geojson: PathBuf,
        map_unit_geojson: PathBuf,
        team_csv: PathBuf,
        out_geojson: PathBuf,
        #[arg(short = 'g', long)]
        geo_column: Option<String>,
        /// Keep only boundaries assigned to some team
        #[arg(long)]
        assigned_only: bool,
    },
    /// Append the comma-joined boundary ids of every team as a new column
    AddGeoIds {
        geojson: PathBuf,
        team_csv: PathBuf,
        out_csv: PathBuf,
        /// Separate map-unit GeoJSON; defaults to the first GeoJSON
        #[arg(long)]
        map_units: Option<PathBuf>,
        #[arg(short = 'g', long)]
        geo_column: Option<String>,
        #[arg(long, default_value = DEFAULT_IDS_COLUMN)]
        column: String,
    },
    /// Scrape every association's first international into a CSV
    ScrapeFirsts {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Take the first link of ambiguous team cells instead of prompting
        #[arg(long)]
        non_interactive: bool,
    },
    /// Download the F1 results dump and load it into SQLite
    LoadF1 {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        db: Option<PathBuf>,
        /// Keep the archive and extracted CSVs in this directory
        #[arg(long)]
        keep_dir: Option<PathBuf>,
    },
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level(cli.verbose).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            AppConfig::default()
        }
    };

    match cli.command {
        Command::CheckGeo {
            sovereign_geojson,
            map_unit_geojson,
            team_csv,
            geo_column,
            strict,
        } => {
            let geo_column = geo_column.unwrap_or_else(|| cfg.geo_column_or_default());
            let service = geo_service(&cfg);
            let src = GeoSources {
                sovereign_geojson: &sovereign_geojson,
                map_unit_geojson: &map_unit_geojson,
                team_csv: &team_csv,
                geo_column: &geo_column,
            };
            service
                .check_geo(src, strict)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        Command::Makegeo {
            sovereign_geojson,
            map_unit_geojson,
            team_csv,
            out_geojson,
            geo_column,
            assigned_only,
        } => {
            let geo_column = geo_column.unwrap_or_else(|| cfg.geo_column_or_default());
            let service = geo_service(&cfg);
            let src = GeoSources {
                sovereign_geojson: &sovereign_geojson,
                map_unit_geojson: &map_unit_geojson,
                team_csv: &team_csv,
                geo_column: &geo_column,
            };
            service
                .make_geo(src, &out_geojson, assigned_only)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        Command::AddGeoIds {
            geojson,
            team_csv,
            out_csv,
            map_units,
            geo_column,
            column,
        } => {
            let geo_column = geo_column.unwrap_or_else(|| cfg.geo_column_or_default());
            geo_service(&cfg)
                .add_geo_ids(
                    &geojson,
                    map_units.as_deref(),
                    &team_csv,
                    &geo_column,
                    &out_csv,
                    &column,
                )
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        Command::ScrapeFirsts {
            output,
            non_interactive,
        } => {
            let out = output.unwrap_or_else(|| PathBuf::from(cfg.scrape_output_or_default()));
            let http: Arc<dyn HttpPort> = Arc::new(
                ReqwestHttp::new(&cfg.user_agent_or_default(), cfg.http_timeout())
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            let chooser: Arc<dyn LinkChooser> = if non_interactive {
                Arc::new(FirstLinkChooser::new())
            } else {
                Arc::new(PromptLinkChooser::new())
            };
            let records = ScrapeService::new(http, chooser)
                .run(&default_pages(), &out)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            info!(path = %out.display(), records = records.len(), "scrape finished");
        }
        Command::LoadF1 { url, db, keep_dir } => {
            let url = url.unwrap_or_else(|| cfg.f1_zip_url_or_default());
            let db = db.unwrap_or_else(|| PathBuf::from(cfg.f1_db_path_or_default()));
            let http: Arc<dyn HttpPort> = Arc::new(
                ReqwestHttp::new(&cfg.user_agent_or_default(), cfg.http_timeout())
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            let archive: Arc<dyn ArchivePort> = Arc::new(ZipExtractor::new());
            let tables: Arc<dyn TablePort> = Arc::new(CsvTable::new());
            let sqlite = SqliteStore::connect(&db)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?;
            let db_path = sqlite.path().to_path_buf();
            let store: Arc<dyn RecordStorePort> = Arc::new(sqlite);

            let loads = F1Service::new(http, archive, tables, store)
                .load(&url, keep_dir.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            info!(
                path = %db_path.display(),
                tables = loads.len(),
                "F1 database ready"
            );
        }
    }

    Ok(())
}

fn geo_service(cfg: &AppConfig) -> GeoService {
    let geojson: Arc<dyn GeoJsonPort> = Arc::new(GeoJsonFile::new());
    let tables: Arc<dyn TablePort> = Arc::new(CsvTable::new());
    GeoService::new(geojson, tables, cfg.property_keys())
}
