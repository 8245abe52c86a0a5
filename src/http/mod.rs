// src/http/mod.rs

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use warp::{http::StatusCode, reject::Rejection, reply::Response, Filter, Reply};

use crate::db::Db;
use crate::error::ValidationError;
use crate::schema::{split_columns, validate_header, SchemaStore};
use crate::series::{parse_row, DataRow, SeriesKind, SeriesStore};

/// Shared handles the route handlers close over.
#[derive(Clone)]
pub struct AppContext {
    pub schemas: Arc<SchemaStore>,
    pub series: Arc<SeriesStore>,
    /// Mirror is optional so the validators stay usable without a disk.
    pub db: Option<Arc<Db>>,
    /// The one calendar year header date axes may carry.
    pub canonical_year: i32,
}

// The legacy clients also send a `csv` field on header/view requests; it was
// never read, and serde ignores it along with any other unknown field.

#[derive(Deserialize)]
struct HeaderRequest {
    header: String,
}

#[derive(Deserialize)]
struct AddDataRequest {
    confirmed: String,
    death: String,
    recovered: String,
}

#[derive(Deserialize)]
struct ViewDataRequest {
    data: String,
}

/// All routes of the service.
pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let with_ctx = warp::any().map(move || ctx.clone());

    let health = warp::path("health").and(warp::get()).and_then(health_check);

    let header = warp::path!("time_series" / "header")
        .and(warp::post())
        .and(with_ctx.clone())
        .and(warp::body::json())
        .and_then(submit_header);

    let add_data = warp::path!("time_series" / "add_data")
        .and(warp::post())
        .and(with_ctx.clone())
        .and(warp::body::json())
        .and_then(add_data);

    let view_data = warp::path!("time_series" / "view_data")
        .and(warp::post())
        .and(with_ctx)
        .and(warp::body::json())
        .and_then(view_data);

    health.or(header).or(add_data).or(view_data)
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "covseries"
    })))
}

/// POST /time_series/header: validate a header declaration and install it
/// as the active schema.
async fn submit_header(ctx: AppContext, req: HeaderRequest) -> Result<Response, Rejection> {
    let columns = split_columns(&req.header);
    match validate_header(&columns, ctx.canonical_year) {
        Ok(schema) => {
            let accepted = schema.accepted_columns();
            ctx.schemas.install(schema);
            info!(columns = accepted.len(), "header accepted");

            let listing = accepted
                .iter()
                .map(|c| format!("'{}'", c))
                .collect::<Vec<_>>()
                .join(", ");
            let msg = format!(
                "header is generated, can process to /time_series/input to input csv body[{}]",
                listing
            );
            Ok(warp::reply::json(&serde_json::json!({ "Success": msg })).into_response())
        }
        // Legacy quirk: a missing/misordered identity prefix is a 200 with a
        // JSON body, not a 400.
        Err(ValidationError::MissingOrMisorderedIdentityColumns) => {
            warn!("header rejected: identity columns");
            Ok(warp::reply::json(&serde_json::json!({ "valid": "Not valid header" }))
                .into_response())
        }
        Err(err) => {
            warn!(%err, "header rejected");
            Ok(plain(StatusCode::BAD_REQUEST, header_failure_text(&err)))
        }
    }
}

fn header_failure_text(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::InvalidMonth => "Invalid header, wrong date format in month",
        ValidationError::InvalidDay => "Invalid header, wrong date format in day",
        ValidationError::InvalidDateSequence => "Invalid header, wrong date format in year",
        _ => "Invalid input",
    }
}

/// POST /time_series/add_data: validate one row per series against the
/// active schema and commit all three or nothing.
async fn add_data(ctx: AppContext, req: AddDataRequest) -> Result<Response, Rejection> {
    let schema = match ctx.schemas.active() {
        Some(schema) => schema,
        None => {
            let err = ValidationError::NoActiveSchema;
            warn!(%err, "data submitted before any header");
            return Ok(plain(StatusCode::BAD_REQUEST, err.to_string()));
        }
    };

    let submissions = [
        (SeriesKind::Confirmed, req.confirmed.as_str()),
        (SeriesKind::Death, req.death.as_str()),
        (SeriesKind::Recovered, req.recovered.as_str()),
    ];

    let mut batch: Vec<(SeriesKind, DataRow)> = Vec::with_capacity(submissions.len());
    for (kind, raw) in submissions {
        match parse_row(kind, raw, &schema) {
            Ok(row) => batch.push((kind, row)),
            Err(err) => {
                warn!(kind = kind.as_str(), %err, "row rejected");
                return Ok(plain(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid data for {}", kind),
                ));
            }
        }
    }

    if let Some(db) = &ctx.db {
        if let Err(err) = db.insert_batch(&batch) {
            warn!(%err, "mirror write failed");
            return Ok(plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage unavailable",
            ));
        }
    }
    ctx.series.append_batch(batch);

    Ok(warp::reply::json(&serde_json::json!({ "response": "update successfully" }))
        .into_response())
}

/// POST /time_series/view_data: all stored rows for one series kind, in
/// insertion order.
async fn view_data(ctx: AppContext, req: ViewDataRequest) -> Result<Response, Rejection> {
    let kind = match SeriesKind::from_str(&req.data) {
        Some(kind) => kind,
        None => {
            warn!(data = req.data.as_str(), "unknown series kind");
            return Ok(plain(StatusCode::BAD_REQUEST, "Invalid input"));
        }
    };

    let rows: Vec<Vec<serde_json::Value>> = ctx
        .series
        .view_all(kind)
        .iter()
        .map(DataRow::as_wire_row)
        .collect();

    let mut body = serde_json::Map::new();
    body.insert(kind.as_str().to_string(), serde_json::Value::from(rows));
    Ok(warp::reply::json(&serde_json::Value::Object(body)).into_response())
}

fn plain(status: StatusCode, text: impl Into<String>) -> Response {
    warp::reply::with_status(text.into(), status).into_response()
}
