use anyhow::Result;
use chrono::{Datelike, Utc};
use covseries::db::{self, Db};
use covseries::http::{routes, AppContext};
use covseries::schema::SchemaStore;
use covseries::series::SeriesStore;
use std::{env, fs, path::Path, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level)
    });
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    // ─── 2) configuration ────────────────────────────────────────────
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "9803".to_string())
        .parse()
        .unwrap_or(9803);
    let db_path = env::var("TIMESERIES_DB").unwrap_or_else(|_| db::DEFAULT_DB_PATH.to_string());
    let canonical_year: i32 = env::var("CANONICAL_YEAR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| Utc::now().year());

    // ─── 3) open the sqlite mirror ───────────────────────────────────
    if let Some(dir) = Path::new(&db_path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = db::timeseries_connection(&db_path)?;
    let database = Db::new(conn)?;
    info!(path = %db_path, "timeseries database ready");

    // ─── 4) wire state + routes, serve ───────────────────────────────
    let ctx = AppContext {
        schemas: Arc::new(SchemaStore::new()),
        series: Arc::new(SeriesStore::new()),
        db: Some(Arc::new(database)),
        canonical_year,
    };
    info!(canonical_year, "accepting date axes for a single calendar year");

    let routes = routes(ctx);
    info!("server starting on port {}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}
