//! Server command implementation

use std::sync::Arc;

use anyhow::Result;
use divvy_core::{MockBackend, SplitBackend, SplitConfig};

pub async fn cmd_serve(host: &str, port: u16, mock_backend: bool, split: SplitConfig) -> Result<()> {
    println!("🚀 Starting Divvy web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   Tolerances: share ±{}, total ±{}",
        split.share_tolerance, split.total_tolerance
    );

    // Parse allowed origins from environment (comma-separated)
    let origins_env = std::env::var("DIVVY_ALLOWED_ORIGINS").unwrap_or_default();
    let allowed_origins = divvy_server::parse_allowed_origins(&origins_env);
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (DIVVY_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }

    let backend: Option<Arc<dyn SplitBackend>> = if mock_backend {
        println!("   🧪 /api/process answers with the scripted demo backend");
        Some(Arc::new(MockBackend::demo()))
    } else {
        println!("   /api/process disabled (use --mock-backend to enable)");
        None
    };
    println!();
    println!("   Press Ctrl+C to stop");

    let config = divvy_server::ServerConfig {
        allowed_origins,
        split,
    };

    divvy_server::serve(host, port, config, backend).await?;

    Ok(())
}
