use std::time::Duration;

use anyhow::Context;
use catalog_api::{
    client::{render_home_page, CatalogClient, Carousel},
    config::ClientConfig,
};
use tracing_subscriber::EnvFilter;

/// Renders the catalog home page from a running backend
///
/// Writes once by default; with `CATALOG_REFRESH_SECS` set it keeps polling
/// and rewrites the page on every tick.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_api=info,catalog_page=info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let client = CatalogClient::new(&config.backend_url, &config.api_base_path);
    let mut carousel = Carousel::default();

    tracing::info!(
        api_url = %client.api_url(),
        user_id = %config.demo_user_id,
        "Rendering catalog page"
    );

    let Some(refresh_secs) = config.refresh_secs else {
        let html = render_home_page(&client, &config.demo_user_id, &carousel).await;
        return write_page(&config, &html).await;
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let html = render_home_page(&client, &config.demo_user_id, &carousel).await;
                write_page(&config, &html).await?;
                carousel.advance();
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping page refresh");
                return Ok(());
            }
        }
    }
}

async fn write_page(config: &ClientConfig, html: &str) -> anyhow::Result<()> {
    match &config.output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path))?;
            tracing::info!(path = %path, bytes = html.len(), "Page written");
        }
        None => println!("{}", html),
    }
    Ok(())
}
