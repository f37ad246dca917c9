//! attune server binary

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use attune_config::{load_settings, PersonaProfiles};
use attune_core::CompletionParams;
use attune_llm::{OpenAiBackend, ProviderConfig};
use attune_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let settings = load_settings(config_path.as_deref())?;

    // Persona profiles are fatal configuration: resolve them before serving.
    let profiles = match &settings.persona.profiles_path {
        Some(path) => PersonaProfiles::load(path)?,
        None => PersonaProfiles::default(),
    };
    profiles.resolve(&settings.persona.style)?;

    let backend = OpenAiBackend::new(ProviderConfig {
        endpoint: settings.completion.endpoint.clone(),
        model: settings.completion.model.clone(),
        api_key: settings.completion.api_key.clone(),
        timeout: Duration::from_secs(settings.completion.timeout_seconds),
    })?;

    let params = CompletionParams {
        model: Some(settings.completion.model.clone()),
        max_tokens: Some(settings.completion.max_tokens),
        temperature: Some(settings.completion.temperature),
        frequency_penalty: Some(settings.completion.frequency_penalty),
        presence_penalty: Some(settings.completion.presence_penalty),
    };

    let state = Arc::new(AppState::new(
        profiles,
        Arc::new(backend),
        params,
        settings.persona.style.clone(),
    ));

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, model = %settings.completion.model, "attune server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
