//! songlink-mcp server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use songlink_client::TrackResolver;
use songlink_core::{AppConfig, CacheOptions, TrackLinkCache};
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!(
        cache_capacity = config.cache_capacity,
        coalesce_requests = config.coalesce_requests,
        "Starting songlink-mcp server on stdio transport"
    );

    let resolver = TrackResolver::from_config(&config)?;
    let cache = TrackLinkCache::new(resolver, CacheOptions::from_config(&config)?);

    let handler = handler::SongLinkServer::new(cache);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
