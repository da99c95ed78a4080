//! TLS certificate loading for the HTTPS listener.

use std::io;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load a rustls server configuration from PEM certificate and key files.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, io::Error> {
    for (kind, path) in [("certificate", cert_path), ("private key", key_path)] {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("TLS {kind} not found: {}", path.display()),
            ));
        }
    }

    let config = RustlsConfig::from_pem_file(cert_path, key_path).await?;
    tracing::info!(cert = %cert_path.display(), "TLS certificate loaded");
    Ok(config)
}
