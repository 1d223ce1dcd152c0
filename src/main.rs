use classmate::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Classmate");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the web server
    startup::start_server(config).await
}
