use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,web=debug")),
        )
        .init();

    let settings = web::Settings::new()?;
    tracing::debug!(?settings, "loaded settings");

    web::launch(settings).await?;
    Ok(())
}
