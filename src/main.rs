use std::error::Error;
use std::sync::Arc;

use seatmap::config::AppConfig;
use seatmap::llm::{LlmChat, LlmClient};
use seatmap::routes;
use seatmap::state::AppState;
use seatmap::store::Repository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, ".env could not be loaded");
        }
    }

    let config = AppConfig::from_env()?;
    let repo = Repository::demo(&mut config.status_source())?;
    tracing::info!(libraries = repo.libraries().len(), seed = ?config.seed, "demo data seeded");

    let llm: Option<Arc<dyn LlmChat>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client ready");
            let client: Arc<dyn LlmChat> = Arc::new(client);
            Some(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM not configured; seat suggestions disabled");
            None
        }
    };

    let state = AppState::new(repo, llm).with_suggestion_max_tokens(config.suggestion_max_tokens);
    let app = routes::app(state);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "seatmap listening");
    axum::serve(listener, app).await?;
    Ok(())
}
