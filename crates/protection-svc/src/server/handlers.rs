//! Axum request handlers for all service endpoints.
//!
//! Handlers resolve the protection system from the registry, invoke the
//! envelope codec, and persist/retrieve records through the stores. Codec
//! failures are caller-input failures and map to 400; missing entities map
//! to 404 — the two are never conflated.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{
        ContentResponse, ContentUpdateResponse, CreateContentRequest, CreateDeviceRequest,
        CreateProtectionSystemRequest, DeleteResponse, DeviceResponse, ErrorResponse,
        HealthResponse, ProtectionSystemResponse, UpdateContentRequest,
    },
    ServiceError,
};
use tracing::warn;
use uuid::Uuid;

use super::state::AppState;
use crate::crypto::{self, ProtectionMode};
use crate::registry::ProtectionSystem;
use crate::store::{ContentRecord, DeviceRecord};

/// Render a [`ServiceError`] as the standard JSON error response.
fn error_response(err: ServiceError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match &err {
        ServiceError::BadRequest(m) | ServiceError::NotFound(m) | ServiceError::Internal(m) => {
            m.clone()
        }
    };
    (status, Json(ErrorResponse::new(err.code(), message))).into_response()
}

fn system_response(system: &ProtectionSystem) -> ProtectionSystemResponse {
    ProtectionSystemResponse {
        id: system.id,
        name: system.name.clone(),
        encryption_mode: system.mode.name().to_owned(),
    }
}

fn content_response(record: &ContentRecord) -> ContentResponse {
    ContentResponse {
        id: record.id,
        protection_system: record.protection_system,
        encrypted_payload: record.encrypted_payload.clone(),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// `GET /health` — liveness check with registry and store counts.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        protection_systems: state.registry.len(),
        contents: state.contents.len().await,
    };
    (StatusCode::OK, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Protection systems
// ---------------------------------------------------------------------------

/// `POST /protection-systems` — register a new protection system.
///
/// The encryption-mode name is resolved eagerly so an unsupported mode is
/// rejected at registration time, not on first use.
pub async fn create_protection_system(
    State(state): State<AppState>,
    Json(req): Json<CreateProtectionSystemRequest>,
) -> Response {
    let mode = match ProtectionMode::from_name(&req.encryption_mode) {
        Ok(m) => m,
        Err(e) => return error_response(ServiceError::BadRequest(e.to_string())),
    };
    let system = state.registry.register(req.name, mode);
    (StatusCode::CREATED, Json(system_response(&system))).into_response()
}

/// `GET /protection-systems` — list all registered protection systems.
pub async fn list_protection_systems(State(state): State<AppState>) -> Response {
    let systems: Vec<ProtectionSystemResponse> = state
        .registry
        .list()
        .iter()
        .map(|s| system_response(s))
        .collect();
    (StatusCode::OK, Json(systems)).into_response()
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// `POST /devices` — register a device against a protection system.
pub async fn create_device(
    State(state): State<AppState>,
    Json(req): Json<CreateDeviceRequest>,
) -> Response {
    if state.registry.resolve(req.protection_system).is_err() {
        return error_response(ServiceError::NotFound("Protection system not found".into()));
    }
    let device = DeviceRecord {
        id: Uuid::new_v4(),
        name: req.name,
        protection_system: req.protection_system,
    };
    let body = DeviceResponse {
        id: device.id,
        name: device.name.clone(),
        protection_system: device.protection_system,
    };
    state.devices.upsert(device).await;
    (StatusCode::CREATED, Json(body)).into_response()
}

/// `GET /devices` — list all registered devices.
pub async fn list_devices(State(state): State<AppState>) -> Response {
    let devices: Vec<DeviceResponse> = state
        .devices
        .list()
        .await
        .into_iter()
        .map(|d| DeviceResponse {
            id: d.id,
            name: d.name,
            protection_system: d.protection_system,
        })
        .collect();
    (StatusCode::OK, Json(devices)).into_response()
}

// ---------------------------------------------------------------------------
// Contents
// ---------------------------------------------------------------------------

/// `POST /contents` — encrypt a plaintext payload and store the envelope.
pub async fn create_content(
    State(state): State<AppState>,
    Json(req): Json<CreateContentRequest>,
) -> Response {
    let system = match state.registry.resolve(req.protection_system) {
        Ok(s) => s,
        Err(_) => {
            return error_response(ServiceError::NotFound("Protection system not found".into()))
        }
    };

    let envelope =
        match crypto::encrypt_payload(system.mode, &req.encryption_key, &req.plaintext_payload) {
            Ok(e) => e,
            Err(e) => return error_response(ServiceError::BadRequest(e.to_string())),
        };

    let record = ContentRecord {
        id: Uuid::new_v4(),
        protection_system: req.protection_system,
        encryption_key: req.encryption_key,
        encrypted_payload: envelope,
    };
    let body = content_response(&record);
    state.contents.upsert(record).await;
    (StatusCode::CREATED, Json(body)).into_response()
}

/// `GET /contents` — list contents whose protection system is used by at
/// least one device.
///
/// Each stored envelope is decrypt-validated before inclusion; a record that
/// fails validation aborts the listing with a 400 carrying the codec failure.
pub async fn list_contents(State(state): State<AppState>) -> Response {
    let in_use = state.devices.protection_systems_in_use().await;

    let mut result = Vec::new();
    for record in state.contents.list().await {
        if !in_use.contains(&record.protection_system) {
            continue;
        }
        // Skip records whose protection system has vanished from the registry.
        let system = match state.registry.resolve(record.protection_system) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Err(e) = crypto::decrypt_payload(
            system.mode,
            &record.encryption_key,
            &record.encrypted_payload,
        ) {
            warn!(content = %record.id, error = %e, "stored envelope failed validation");
            return error_response(ServiceError::BadRequest(e.to_string()));
        }
        result.push(content_response(&record));
    }

    (StatusCode::OK, Json(result)).into_response()
}

/// `GET /contents/{id}` — fetch one content record, decrypt-validated.
pub async fn get_content(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let record = match state.contents.get(id).await {
        Some(r) => r,
        None => return error_response(ServiceError::NotFound("Content not found".into())),
    };
    let system = match state.registry.resolve(record.protection_system) {
        Ok(s) => s,
        Err(_) => {
            return error_response(ServiceError::NotFound("Protection system not found".into()))
        }
    };

    match crypto::decrypt_payload(system.mode, &record.encryption_key, &record.encrypted_payload) {
        Ok(_) => (StatusCode::OK, Json(content_response(&record))).into_response(),
        Err(e) => {
            warn!(content = %record.id, error = %e, "stored envelope failed validation");
            error_response(ServiceError::BadRequest(e.to_string()))
        }
    }
}

/// `PUT /contents/{id}` — update a content record.
///
/// Absent fields keep their current values. The envelope is rebuilt only when
/// a new plaintext payload is supplied; key or system changes alone leave the
/// stored envelope untouched.
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> Response {
    let record = match state.contents.get(id).await {
        Some(r) => r,
        None => return error_response(ServiceError::NotFound("Content not found".into())),
    };

    let protection_system = req.protection_system.unwrap_or(record.protection_system);
    let encryption_key = req.encryption_key.unwrap_or_else(|| record.encryption_key.clone());

    let system = match state.registry.resolve(protection_system) {
        Ok(s) => s,
        Err(_) => {
            return error_response(ServiceError::NotFound("Protection system not found".into()))
        }
    };

    let encrypted_payload = match req.plaintext_payload {
        Some(plaintext) => {
            match crypto::encrypt_payload(system.mode, &encryption_key, &plaintext) {
                Ok(e) => e,
                Err(e) => return error_response(ServiceError::BadRequest(e.to_string())),
            }
        }
        None => record.encrypted_payload,
    };

    let updated = ContentRecord {
        id,
        protection_system,
        encryption_key,
        encrypted_payload,
    };
    let body = ContentUpdateResponse {
        id: updated.id,
        protection_system: updated.protection_system,
        encryption_key: updated.encryption_key.clone(),
        encrypted_payload: updated.encrypted_payload.clone(),
    };
    state.contents.upsert(updated).await;
    (StatusCode::OK, Json(body)).into_response()
}

/// `DELETE /contents/{id}` — remove a content record.
pub async fn delete_content(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.contents.remove(id).await {
        (StatusCode::OK, Json(DeleteResponse { result: true })).into_response()
    } else {
        error_response(ServiceError::NotFound("Content not found".into()))
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
