//! Control Surface Payload Types
//!
//! Response shapes produced for the external lifecycle/API layer. The
//! HTTP endpoints themselves live outside this crate; these types define
//! the payloads they exchange with the listener.

use serde::{Deserialize, Serialize};

/// Listener status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the listener is currently running
    pub running: bool,
    /// Human-readable status message
    pub message: String,
}

/// Result of a start/stop control operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    /// False when the operation was a redundant no-op
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
}

/// Result of a mapping reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// Human-readable outcome message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_json_shape() {
        let status = StatusResponse {
            running: true,
            message: "listener running".to_string(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["running"], true);
        assert_eq!(json["message"], "listener running");
    }

    #[test]
    fn test_control_response_round_trip() {
        let resp = ControlResponse {
            success: false,
            message: "listener already running".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: ControlResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resp);
    }
}
