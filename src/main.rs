//! ReAct Assistant - Web UI entry point

use std::sync::Arc;

use react_assistant::agent::ReActAssistant;
use react_assistant::config::Config;
use react_assistant::llm::OpenAiProvider;
use react_assistant::{logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging()?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ {}", e);
            eprintln!("Configure a variável de ambiente OPENAI_API_KEY para iniciar o agente.");
            std::process::exit(1);
        }
    };

    tracing::info!("Using model: {}", config.openai_model);

    let mut provider = OpenAiProvider::new(&config.openai_api_key, &config.openai_model)?;
    if let Some(base_url) = config.openai_base_url.clone() {
        tracing::info!("Using custom base URL: {}", base_url);
        provider = provider.with_base_url(base_url);
    }

    let assistant = ReActAssistant::new(Arc::new(provider), config.serpapi_key.clone())?;
    tracing::info!("Available tools: {}", assistant.available_tools().join(", "));

    web::serve(assistant, &config).await
}
