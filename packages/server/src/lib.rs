#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crime prediction frontend.
//!
//! Serves the JSON API that drives the landing map, the results
//! dashboard, report exports, the district location picker and the
//! prediction date field, plus the static frontend build.

mod handlers;
pub mod interactive;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use crime_predict_picker::LocationPicker;
use crime_predict_server_models::ApiAlert;
use uuid::Uuid;

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No district with this name.
    #[error("Unknown district '{0}'")]
    UnknownDistrict(String),

    /// No picker session with this id.
    #[error("Picker session {0} not found")]
    SessionNotFound(Uuid),

    /// A user-facing alert; the message is shown as-is.
    #[error("{0}")]
    Alert(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Converts the error into its HTTP response.
    ///
    /// Alerts become `422 { "alert": ... }`; everything else becomes
    /// `{ "error": ... }` with a matching status.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        match self {
            Self::UnknownDistrict(_) | Self::SessionNotFound(_) => HttpResponse::NotFound()
                .json(serde_json::json!({ "error": self.to_string() })),
            Self::Alert(alert) => HttpResponse::UnprocessableEntity().json(ApiAlert { alert }),
            Self::Internal(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": self.to_string() }))
            }
        }
    }
}

/// Server settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Seeds the forecast jitter so charts are reproducible.
    pub forecast_seed: Option<u64>,
    /// Directory of the built frontend.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            forecast_seed: None,
            static_dir: "app/dist".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, `FORECAST_SEED` and `STATIC_DIR`.
    ///
    /// Missing or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT").map_or(defaults.port, |p| {
            p.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT '{p}', using {}", defaults.port);
                defaults.port
            })
        });

        let forecast_seed = lookup("FORECAST_SEED").and_then(|s| {
            s.parse()
                .inspect_err(|_| log::warn!("Invalid FORECAST_SEED '{s}', ignoring"))
                .ok()
        });

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            forecast_seed,
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }
}

/// Picker sessions untouched for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Most picker sessions kept open at once. Opening one more drops the
/// least recently used.
pub const MAX_SESSIONS: usize = 1_000;

#[derive(Debug)]
struct PickerSession {
    picker: LocationPicker,
    last_touched: Instant,
}

type Sessions = BTreeMap<Uuid, PickerSession>;

/// Shared application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Open location picker sessions, one per prediction form.
    sessions: Mutex<Sessions>,
    /// Fixed forecast seed, if configured.
    pub forecast_seed: Option<u64>,
}

impl AppState {
    #[must_use]
    pub fn new(forecast_seed: Option<u64>) -> Self {
        Self {
            sessions: Mutex::new(BTreeMap::new()),
            forecast_seed,
        }
    }

    /// Stores `picker` as a new session and returns its id.
    pub fn open_session(&self, picker: LocationPicker) -> Uuid {
        self.open_session_at(picker, Instant::now())
    }

    /// Runs `f` on the session's picker and marks the session as used.
    /// Returns `None` when no such session is open.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut LocationPicker) -> T,
    ) -> Option<T> {
        self.with_session_at(id, Instant::now(), f)
    }

    /// Drops a session. Returns `false` when it was not open.
    pub fn close_session(&self, id: Uuid) -> bool {
        self.sessions().remove(&id).is_some()
    }

    fn open_session_at(&self, picker: LocationPicker, now: Instant) -> Uuid {
        let mut sessions = self.sessions();
        evict_idle(&mut sessions, now);

        while sessions.len() >= MAX_SESSIONS {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_touched)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            log::debug!("Evicted picker session {oldest} (limit {MAX_SESSIONS})");
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            PickerSession {
                picker,
                last_touched: now,
            },
        );
        id
    }

    fn with_session_at<T>(
        &self,
        id: Uuid,
        now: Instant,
        f: impl FnOnce(&mut LocationPicker) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions();
        evict_idle(&mut sessions, now);

        let session = sessions.get_mut(&id)?;
        session.last_touched = now;
        Some(f(&mut session.picker))
    }

    /// Locks the picker sessions. A panic in another handler leaves the
    /// map usable.
    fn sessions(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_idle(sessions: &mut Sessions, now: Instant) {
    let before = sessions.len();
    sessions.retain(|_, session| {
        now.saturating_duration_since(session.last_touched) <= SESSION_IDLE_TIMEOUT
    });

    let evicted = before - sessions.len();
    if evicted > 0 {
        log::debug!("Evicted {evicted} idle picker sessions");
    }
}

/// Registers every `/api` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/map", web::get().to(handlers::landing_map))
            .route("/districts", web::get().to(handlers::districts))
            .route("/districts/search", web::get().to(handlers::search_districts))
            .route("/districts/{name}", web::get().to(handlers::district))
            .route("/dashboard", web::post().to(handlers::dashboard))
            .route("/export/csv", web::post().to(handlers::export_csv))
            .route("/export/pdf", web::post().to(handlers::export_pdf))
            .route("/picker", web::post().to(handlers::create_picker))
            .route("/picker/{id}", web::get().to(handlers::get_picker))
            .route("/picker/{id}", web::delete().to(handlers::delete_picker))
            .route("/picker/{id}/events", web::post().to(handlers::picker_event))
            .route("/date/validate", web::post().to(handlers::validate_date)),
    );
}

/// Starts the API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(config.forecast_seed));
    let static_dir = config.static_dir.clone();

    if let Some(seed) = config.forecast_seed {
        log::info!("Forecast jitter seeded with {seed}");
    }
    log::info!(
        "Starting server on {}:{} (static files from {static_dir})",
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
