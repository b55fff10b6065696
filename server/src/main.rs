use std::sync::Arc;

use tokio::net::TcpListener;
use todo_server::{config::Settings, logging, store::TodoStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let settings = match Settings::from_env() {
        Ok(settings) => Arc::new(settings),
        Err(error) => {
            logging::init(&Settings::default());
            logging::log_config_error(&error);
            std::process::exit(1);
        }
    };

    logging::init(&settings);

    tracing::info!(
        project = %settings.project_name,
        version = %settings.version,
        environment = %settings.environment,
        debug = settings.debug,
        api_prefix = %settings.api_prefix,
        dotenv_loaded,
        "configuration loaded"
    );

    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    todo_server::run(listener, todo_server::app(TodoStore::new(), settings)).await?;
    tracing::info!("server stopped");
    Ok(())
}
