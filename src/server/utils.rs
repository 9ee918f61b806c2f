//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;
use std::io::ErrorKind;

impl HttpServer {
    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        match error.kind() {
            ErrorKind::AddrInUse => GatewayError::internal(format!(
                "Port {} is already in use. Stop the other process or start with --port {} (or PORT={})",
                port,
                port.saturating_add(1),
                port.saturating_add(1)
            )),
            ErrorKind::PermissionDenied => GatewayError::internal(format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. --port 8000",
                port
            )),
            _ => GatewayError::internal(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }
}
