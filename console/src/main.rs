use catalog_console::{repl, Config, TerminalView, UreqTransport};
use catalog_core::{CatalogClient, CatalogController};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load()?;
    info!(api_url = %config.api_url, "starting catalog console");

    let view = TerminalView::new(std::io::stdin().lock(), std::io::stdout());
    let mut controller = CatalogController::new(CatalogClient::new(&config.api_url), view);
    repl::run(&mut controller, &UreqTransport::new())
}
