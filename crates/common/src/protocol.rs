//! Request and response types exchanged over the public JSON API.
//!
//! Every operation has an explicit, validated body type — handlers never see
//! untyped JSON maps.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Contents
// ---------------------------------------------------------------------------

/// Request body for `POST /contents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContentRequest {
    /// Id of the protection system whose mode encrypts the payload.
    pub protection_system: Uuid,
    /// Base64-encoded encryption key, supplied by the caller and stored as-is.
    pub encryption_key: String,
    /// Plaintext payload to encrypt.
    pub plaintext_payload: String,
}

/// Request body for `PUT /contents/{id}`.
///
/// Absent fields default to the content's current values. The payload is
/// re-encrypted only when `plaintext_payload` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContentRequest {
    #[serde(default)]
    pub protection_system: Option<Uuid>,
    #[serde(default)]
    pub encryption_key: Option<String>,
    #[serde(default)]
    pub plaintext_payload: Option<String>,
}

/// Response body for content reads and creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub id: Uuid,
    pub protection_system: Uuid,
    /// Base64 envelope; for CBC modes it embeds a 16-byte IV prefix.
    pub encrypted_payload: String,
}

/// Response body for `PUT /contents/{id}` — echoes the stored key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpdateResponse {
    pub id: Uuid,
    pub protection_system: Uuid,
    pub encryption_key: String,
    pub encrypted_payload: String,
}

/// Response body for `DELETE /contents/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub result: bool,
}

// ---------------------------------------------------------------------------
// Protection systems
// ---------------------------------------------------------------------------

/// Request body for `POST /protection-systems`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProtectionSystemRequest {
    /// Human-readable label, e.g. `"AES"`.
    pub name: String,
    /// Encryption-mode name, e.g. `"AES + ECB"` or `"AES + CBC"`.
    pub encryption_mode: String,
}

/// Response body describing a registered protection system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionSystemResponse {
    pub id: Uuid,
    pub name: String,
    pub encryption_mode: String,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Request body for `POST /devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    /// Id of the protection system this device plays content from.
    pub protection_system: Uuid,
}

/// Response body describing a registered device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: Uuid,
    pub name: String,
    pub protection_system: Uuid,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, always `"ok"` while the process is serving.
    pub status: String,
    /// Number of protection systems currently registered.
    pub protection_systems: usize,
    /// Number of content records currently stored.
    pub contents: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_content_request_round_trip() {
        let req = CreateContentRequest {
            protection_system: Uuid::new_v4(),
            encryption_key: "p2iW1rL0WwjbkBFv6Er67Q==".into(),
            plaintext_payload: "Some test data".into(),
        };
        let encoded = serde_json::to_string(&req).unwrap();
        let decoded: CreateContentRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.plaintext_payload, "Some test data");
        assert_eq!(decoded.protection_system, req.protection_system);
    }

    #[test]
    fn update_request_fields_default_to_none() {
        let decoded: UpdateContentRequest = serde_json::from_value(json!({})).unwrap();
        assert!(decoded.protection_system.is_none());
        assert!(decoded.encryption_key.is_none());
        assert!(decoded.plaintext_payload.is_none());
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("bad_request", "incorrect padding");
        assert_eq!(e.code, "bad_request");
        assert!(e.message.contains("incorrect padding"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            protection_systems: 2,
            contents: 5,
        };
        let encoded = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.contents, 5);
        assert_eq!(decoded.status, "ok");
    }
}
