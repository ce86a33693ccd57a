//! Web chat UI
//!
//! A single-page form: query input, a toggle for showing the reasoning
//! trace, and a markdown output region. Runs are serialized behind a mutex;
//! the assistant handles one query at a time.

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, response::Html, routing::get, Form, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::agent::ReActAssistant;
use crate::config::Config;

/// Example queries shown under the form
const EXAMPLE_QUERIES: &[&str] = &[
    "Quanto é 25 * 4 + 100?",
    "O que é LangChain?",
    "Qual o clima em São Paulo?",
    "Qual o preço do bitcoin?",
];

/// Shared application state
struct AppState {
    assistant: ReActAssistant,
    run_lock: Mutex<()>,
}

/// Serve the web UI until the process is stopped
pub async fn serve(assistant: ReActAssistant, config: &Config) -> Result<()> {
    let state = Arc::new(AppState {
        assistant,
        run_lock: Mutex::new(()),
    });

    let app = Router::new()
        .route("/", get(index).post(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Web UI listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct AskForm {
    #[serde(default)]
    query: String,
    /// Present (any value) when the checkbox is ticked
    #[serde(default)]
    show_reasoning: Option<String>,
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.assistant, "", false, None))
}

async fn ask(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Html<String> {
    let query = form.query.trim().to_string();
    let show_reasoning = form.show_reasoning.is_some();

    if query.is_empty() {
        return Html(render_page(
            &state.assistant,
            "",
            show_reasoning,
            Some("Digite uma pergunta.".to_string()),
        ));
    }

    // One run at a time; concurrent submissions wait here.
    let output = {
        let _guard = state.run_lock.lock().await;
        let result = state.assistant.run(&query).await;
        if show_reasoning || !result.success {
            result.render_trace()
        } else {
            result.answer.unwrap_or_default()
        }
    };

    Html(render_page(&state.assistant, &query, show_reasoning, Some(output)))
}

/// Render the full page
fn render_page(
    assistant: &ReActAssistant,
    query: &str,
    show_reasoning: bool,
    output: Option<String>,
) -> String {
    let tools = assistant
        .available_tools()
        .iter()
        .map(|name| format!("<li>{}</li>", escape_html(name)))
        .collect::<Vec<_>>()
        .join("");

    let examples = EXAMPLE_QUERIES
        .iter()
        .map(|q| format!("<li>{}</li>", escape_html(q)))
        .collect::<Vec<_>>()
        .join("");

    let output_block = output
        .map(|text| {
            format!(
                r#"<h2>Resposta</h2><div class="output">{}</div>"#,
                escape_html(&text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>🤖 ReAct Assistant</title>
<style>
body {{ font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }}
textarea {{ width: 100%; height: 4rem; font-size: 1rem; }}
button {{ font-size: 1rem; padding: 0.4rem 1.2rem; }}
.output {{ white-space: pre-wrap; background: #f6f6f6; border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }}
.sidebar {{ color: #555; font-size: 0.9rem; }}
</style>
</head>
<body>
<h1>🤖 ReAct Assistant</h1>
<p>Agente de IA com Reasoning + Acting. Faça uma pergunta; o agente decide quais ferramentas usar.</p>
<form method="post" action="/">
<textarea name="query" placeholder="Digite sua pergunta...">{query}</textarea>
<p>
<label><input type="checkbox" name="show_reasoning" value="on"{checked}> Mostrar raciocínio completo</label>
<button type="submit">Perguntar</button>
</p>
</form>
{output_block}
<div class="sidebar">
<h3>Ferramentas disponíveis</h3>
<ul>{tools}</ul>
<h3>Exemplos</h3>
<ul>{examples}</ul>
</div>
</body>
</html>"#,
        query = escape_html(query),
        checked = if show_reasoning { " checked" } else { "" },
        output_block = output_block,
        tools = tools,
        examples = examples,
    )
}

/// Minimal HTML escaping for text nodes and attribute values
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
