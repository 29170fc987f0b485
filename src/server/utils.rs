//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;

impl HttpServer {
    /// Turn a bind failure into a readable startup error
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        if error.kind() == std::io::ErrorKind::AddrInUse {
            return GatewayError::Config(format!(
                "Port {} is already in use. Stop the other process or pick another port with --port or PORT.",
                port
            ));
        }

        GatewayError::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to bind to {}: {}", bind_addr, error),
        ))
    }
}
