//! Servidor web Axum com WebSocket para limpeza de entidades NER em lote e em tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use denoise_core::{
    corpus::demo_groups, ConfigOverrides, DenoiseError, DenoiseEvent, DenoiseSettings, Denoiser,
    Language, SpanCount,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Quantos spans `/table` devolve quando `top` não é informado.
const DEFAULT_TOP: usize = 50;

/// Estado compartilhado da aplicação
struct AppState {
    settings: DenoiseSettings,
}

impl AppState {
    /// Denoiser do idioma pedido, com as sobrescritas da requisição.
    fn denoiser(&self, language: Language, overrides: Option<&ConfigOverrides>) -> Result<Denoiser, DenoiseError> {
        let base = self.settings.for_language(language).clone();
        let config = match overrides {
            Some(o) => o.apply(base),
            None => base,
        };
        Denoiser::new(language, config)
    }
}

/// Corpo de `/clean` e mensagem do WebSocket.
#[derive(Deserialize)]
struct CleanRequest {
    language: Language,
    groups: Vec<String>,
    #[serde(default)]
    config: Option<ConfigOverrides>,
}

#[derive(Serialize)]
struct CleanResponse {
    results: Vec<String>,
    distinct_spans: usize,
    processing_ms: u64,
}

#[derive(Deserialize)]
struct TableRequest {
    language: Language,
    groups: Vec<String>,
    #[serde(default)]
    top: Option<usize>,
    #[serde(default)]
    config: Option<ConfigOverrides>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match std::env::var_os("DENOISE_CONFIG").map(PathBuf::from) {
        Some(path) => {
            info!("Carregando configuração de {}", path.display());
            DenoiseSettings::load(&path)?
        }
        None => DenoiseSettings::default(),
    };
    let bind = settings.bind.clone();
    let app = app(Arc::new(AppState { settings }));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("🚀 Servidor de limpeza NER iniciado em http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/clean", post(clean_handler))
        .route("/table", post(table_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-groups", get(demo_groups_handler))
        .layer(cors)
        .with_state(state)
}

fn bad_request(err: DenoiseError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": err.to_string()})),
    )
        .into_response()
}

/// Limpeza em lote via HTTP POST (sem streaming)
async fn clean_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CleanRequest>,
) -> Response {
    let denoiser = match state.denoiser(req.language, req.config.as_ref()) {
        Ok(d) => d,
        Err(err) => return bad_request(err),
    };

    // O pipeline é síncrono e usa rayon: roda fora do runtime
    let outcome = tokio::task::spawn_blocking(move || {
        let start = std::time::Instant::now();
        let (results, table) = denoiser.clean_with_table(&req.groups)?;
        Ok::<_, DenoiseError>(CleanResponse {
            results,
            distinct_spans: table.len(),
            processing_ms: start.elapsed().as_millis() as u64,
        })
    })
    .await;

    match outcome {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(err)) => bad_request(err),
        Err(err) => {
            warn!("Tarefa de limpeza falhou: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Visão ordenada da tabela de frequência
async fn table_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TableRequest>,
) -> Response {
    let denoiser = match state.denoiser(req.language, req.config.as_ref()) {
        Ok(d) => d,
        Err(err) => return bad_request(err),
    };

    let top = req.top.unwrap_or(DEFAULT_TOP);
    let outcome = tokio::task::spawn_blocking(move || {
        denoiser
            .table_for(&req.groups)
            .map(|table| table.top(top))
    })
    .await;

    match outcome {
        Ok(Ok(spans)) => Json::<Vec<SpanCount>>(spans).into_response(),
        Ok(Err(err)) => bad_request(err),
        Err(err) => {
            warn!("Tarefa de tabela falhou: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Retorna os grupos de demonstração dos dois idiomas
async fn demo_groups_handler() -> impl IntoResponse {
    let groups: Vec<serde_json::Value> = Language::all()
        .iter()
        .map(|language| {
            serde_json::json!({
                "language": language,
                "groups": demo_groups(*language),
            })
        })
        .collect();
    Json(groups)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe grupos, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let req = match serde_json::from_str::<CleanRequest>(&text) {
                    Ok(req) => req,
                    Err(err) => {
                        let event = DenoiseEvent::Error {
                            message: format!("requisição inválida: {}", err),
                        };
                        if !send_event(&mut socket, &event).await {
                            return;
                        }
                        continue;
                    }
                };

                let denoiser = match state.denoiser(req.language, req.config.as_ref()) {
                    Ok(d) => d,
                    Err(err) => {
                        let event = DenoiseEvent::Error { message: err.to_string() };
                        if !send_event(&mut socket, &event).await {
                            return;
                        }
                        continue;
                    }
                };

                info!("Limpando via WebSocket [{}]: {} grupos", req.language, req.groups.len());

                let (tx, rx) = std::sync::mpsc::channel::<DenoiseEvent>();

                // Roda o pipeline em thread separada (é síncrono); erros chegam como evento
                let handle = tokio::task::spawn_blocking(move || {
                    let _ = denoiser.clean_streaming(&req.groups, tx);
                });
                handle.await.ok();

                let events: Vec<DenoiseEvent> = rx.try_iter().collect();
                for event in &events {
                    if !send_event(&mut socket, event).await {
                        return; // cliente desconectou
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

/// Envia um evento como JSON; `false` se o cliente desconectou.
async fn send_event(socket: &mut WebSocket, event: &DenoiseEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(err) => {
            warn!("Falha ao serializar evento: {}", err);
            true
        }
    }
}
