//! Response compression.
//!
//! Negotiation is delegated to `tower_http`'s `CompressionLayer`: an absent or
//! empty `Accept-Encoding` (or `identity` only) leaves the body untouched with
//! no `Content-Encoding`; otherwise the preferred enabled encoding is applied
//! and `Content-Length` is dropped in favour of a streamed body.

use tower_http::compression::CompressionLayer;
use tower_http::CompressionLevel as TowerLevel;

use crate::config::{CompressionConfig, CompressionLevel};

/// Build the compression layer from configuration.
pub fn compression_layer(config: &CompressionConfig) -> CompressionLayer {
    let level = match config.level {
        CompressionLevel::Fastest => TowerLevel::Fastest,
        CompressionLevel::Default => TowerLevel::Default,
        CompressionLevel::Best => TowerLevel::Best,
    };

    CompressionLayer::new()
        .gzip(config.gzip)
        .br(config.br)
        .deflate(config.deflate)
        .zstd(config.zstd)
        .quality(level)
}
