//! HTTP handler functions for the crime prediction API.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use chrono::{Local, Utc};
use crime_predict_export::{ExportError, ExportFormat};
use crime_predict_picker::{DateRangeField, LocationPicker, PickerEvent};
use crime_predict_prediction_models::{ServerResults, parse_crime_types, parse_server_data};
use crime_predict_server_models::{
    ApiDistrict, ApiHealth, ApiPickerSession, ApiSearchResult, CreatePickerRequest,
    DateValidateRequest, DateValidateResponse, PredictionPayload, SearchQueryParams,
};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::{ApiError, AppState};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/map`
///
/// The landing page map with its city markers.
pub async fn landing_map() -> HttpResponse {
    HttpResponse::Ok().json(crime_predict_dashboard::maps::landing_map())
}

/// `GET /api/districts`
pub async fn districts() -> HttpResponse {
    let districts: Vec<ApiDistrict> = crime_predict_district::all()
        .iter()
        .map(|d| ApiDistrict::new(d, &crime_predict_district::sorted_samples(d)))
        .collect();

    HttpResponse::Ok().json(districts)
}

/// `GET /api/districts/search?q=`
pub async fn search_districts(params: web::Query<SearchQueryParams>) -> HttpResponse {
    let term = params.q.as_deref().unwrap_or_default();
    let results: Vec<ApiSearchResult> = crime_predict_district::search(term)
        .into_iter()
        .map(ApiSearchResult::from)
        .collect();

    HttpResponse::Ok().json(results)
}

/// `GET /api/districts/{name}`
pub async fn district(path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    match crime_predict_district::find(&name) {
        Some(d) => {
            HttpResponse::Ok().json(ApiDistrict::new(d, &crime_predict_district::sorted_samples(d)))
        }
        None => ApiError::UnknownDistrict(name).into_response(),
    }
}

/// Parses the embedded page texts.
fn parse_payload(payload: &PredictionPayload) -> (Option<ServerResults>, Vec<String>) {
    (
        parse_server_data(payload.server_data.as_deref()),
        parse_crime_types(payload.crime_types.as_deref()),
    )
}

/// `POST /api/dashboard`
///
/// Renders the hotspot map and all charts for a results page.
pub async fn dashboard(
    state: web::Data<AppState>,
    payload: web::Json<PredictionPayload>,
) -> HttpResponse {
    let (results, crime_types) = parse_payload(&payload);

    let view = match state.forecast_seed {
        Some(seed) => crime_predict_dashboard::render(
            results.as_ref(),
            &crime_types,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => crime_predict_dashboard::render(results.as_ref(), &crime_types, &mut rand::rng()),
    };

    HttpResponse::Ok().json(view)
}

/// `POST /api/export/csv`
pub async fn export_csv(payload: web::Json<PredictionPayload>) -> HttpResponse {
    export(ExportFormat::Csv, &payload)
}

/// `POST /api/export/pdf`
pub async fn export_pdf(payload: web::Json<PredictionPayload>) -> HttpResponse {
    export(ExportFormat::Pdf, &payload)
}

fn export(format: ExportFormat, payload: &PredictionPayload) -> HttpResponse {
    let (results, crime_types) = parse_payload(payload);

    let file = match crime_predict_export::export(
        format,
        results.as_ref(),
        &crime_types,
        Local::now().naive_local(),
        Utc::now().date_naive(),
    ) {
        Ok(file) => file,
        Err(e @ ExportError::NoData) => return ApiError::Alert(e.to_string()).into_response(),
        Err(e) => {
            return ApiError::Internal(format!("Failed to export {format}: {e}")).into_response();
        }
    };

    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ))
        .body(file.bytes)
}

fn session_view(id: Uuid, picker: &LocationPicker) -> ApiPickerSession {
    ApiPickerSession {
        id,
        view: picker.view(),
    }
}

/// `POST /api/picker`
///
/// Opens a picker session, optionally with a district already chosen.
pub async fn create_picker(
    state: web::Data<AppState>,
    body: Option<web::Json<CreatePickerRequest>>,
) -> HttpResponse {
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let picker = LocationPicker::with_district(request.district.as_deref());
    let view = picker.view();

    let id = state.open_session(picker);
    log::debug!("Opened picker session {id}");

    HttpResponse::Created().json(ApiPickerSession { id, view })
}

/// `GET /api/picker/{id}`
pub async fn get_picker(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state.with_session(id, |picker| session_view(id, picker)) {
        Some(session) => HttpResponse::Ok().json(session),
        None => ApiError::SessionNotFound(id).into_response(),
    }
}

/// `POST /api/picker/{id}/events`
///
/// Applies one event. Rejected events come back as alerts.
pub async fn picker_event(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    event: web::Json<PickerEvent>,
) -> HttpResponse {
    let id = path.into_inner();

    let applied = state.with_session(id, |picker| {
        picker
            .apply(event.into_inner())
            .map(|()| session_view(id, picker))
    });

    match applied {
        Some(Ok(session)) => HttpResponse::Ok().json(session),
        Some(Err(e)) => ApiError::Alert(e.to_string()).into_response(),
        None => ApiError::SessionNotFound(id).into_response(),
    }
}

/// `DELETE /api/picker/{id}`
pub async fn delete_picker(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    if state.close_session(id) {
        log::debug!("Closed picker session {id}");
        HttpResponse::NoContent().finish()
    } else {
        ApiError::SessionNotFound(id).into_response()
    }
}

/// `POST /api/date/validate`
///
/// Checks a prediction date change against today.
pub async fn validate_date(request: web::Json<DateValidateRequest>) -> HttpResponse {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let mut field = DateRangeField::new(today);
    let result = field.change(&request.value);

    HttpResponse::Ok().json(DateValidateResponse {
        value: field.value,
        min: field.min,
        max: field.max,
        accepted: result.is_ok(),
        alert: result.err().map(|e| e.to_string()),
    })
}
