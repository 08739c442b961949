//! Axum web server with WebSocket streaming for visualization.

use std::sync::Arc;

use axum::{
    extract::{State, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sortvis_steps::{Algorithm, AlgorithmInfo, Frame, FrameSequence, DEFAULT_INPUT};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::config::VisConfig;
use crate::controller::{Controller, PlaybackUpdate};
use crate::error::Result;
use crate::playback::{Playback, PlaybackCommand, PlaybackStatus, StepDirection};

/// Visualization server.
pub struct VisServer {
    config: VisConfig,
    controller: Arc<Controller>,
}

impl VisServer {
    /// Create a server over the fixed input sequence.
    pub fn new(config: VisConfig) -> Self {
        let playback = Playback::new(&DEFAULT_INPUT, config.algorithm, config.speed_ms);
        Self {
            config,
            controller: Controller::new(playback),
        }
    }

    /// The controller every route dispatches to.
    pub fn controller(&self) -> &Arc<Controller> {
        &self.controller
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Minimal renderer
            .route("/", get(index_handler))
            // Read-only views
            .route("/api/status", get(status_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/frames", get(frames_handler))
            .route("/api/algorithms", get(algorithms_handler))
            // Commands
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/toggle", post(toggle_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/playback/algorithm", post(algorithm_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.controller.clone())
    }

    /// Run the server on the configured address.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("Visualization server running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

type AppState = State<Arc<Controller>>;

/// Serve the renderer page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn status_handler(State(controller): AppState) -> Json<PlaybackStatus> {
    Json(controller.status().await)
}

async fn frame_handler(State(controller): AppState) -> Json<Frame> {
    Json(controller.current_frame().await)
}

async fn frames_handler(State(controller): AppState) -> Json<FrameSequence> {
    Json(controller.frames().await)
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(Algorithm::ALL.iter().map(Algorithm::info).collect())
}

async fn play_handler(State(controller): AppState) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::Play).await)
}

async fn pause_handler(State(controller): AppState) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::Pause).await)
}

async fn toggle_handler(State(controller): AppState) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::TogglePlay).await)
}

async fn reset_handler(State(controller): AppState) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::Reset).await)
}

#[derive(Debug, Deserialize)]
struct StepRequest {
    direction: StepDirection,
}

async fn step_handler(
    State(controller): AppState,
    Json(req): Json<StepRequest>,
) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::Step { direction: req.direction }).await)
}

#[derive(Debug, Deserialize)]
struct SeekRequest {
    frame: usize,
}

async fn seek_handler(
    State(controller): AppState,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::Seek { frame: req.frame }).await)
}

#[derive(Debug, Deserialize)]
struct SpeedRequest {
    speed_ms: u64,
}

async fn speed_handler(
    State(controller): AppState,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    Json(controller.dispatch(PlaybackCommand::SetSpeed { speed_ms: req.speed_ms }).await)
}

#[derive(Debug, Deserialize)]
struct AlgorithmRequest {
    algorithm: Algorithm,
}

async fn algorithm_handler(
    State(controller): AppState,
    Json(req): Json<AlgorithmRequest>,
) -> Json<PlaybackStatus> {
    Json(
        controller
            .dispatch(PlaybackCommand::SelectAlgorithm { algorithm: req.algorithm })
            .await,
    )
}

async fn ws_handler(ws: WebSocketUpgrade, State(controller): AppState) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, controller))
}

/// Commands accepted over the WebSocket. Ticks are internal and not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetSnapshot,
    SelectAlgorithm { algorithm: Algorithm },
    Play,
    Pause,
    TogglePlay,
    Step { direction: StepDirection },
    Seek { frame: usize },
    SetSpeed { speed_ms: u64 },
    Reset,
}

impl WsCommand {
    fn into_playback(self) -> Option<PlaybackCommand> {
        Some(match self {
            WsCommand::GetSnapshot => return None,
            WsCommand::SelectAlgorithm { algorithm } => PlaybackCommand::SelectAlgorithm { algorithm },
            WsCommand::Play => PlaybackCommand::Play,
            WsCommand::Pause => PlaybackCommand::Pause,
            WsCommand::TogglePlay => PlaybackCommand::TogglePlay,
            WsCommand::Step { direction } => PlaybackCommand::Step { direction },
            WsCommand::Seek { frame } => PlaybackCommand::Seek { frame },
            WsCommand::SetSpeed { speed_ms } => PlaybackCommand::SetSpeed { speed_ms },
            WsCommand::Reset => PlaybackCommand::Reset,
        })
    }
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    socket.send(Message::Text(json.into())).await?;
    Ok(())
}

async fn handle_ws(mut socket: WebSocket, controller: Arc<Controller>) {
    // Subscribe before reading the snapshot so no update falls in between.
    let mut updates = controller.subscribe();

    if let Err(e) = send_json(&mut socket, &controller.snapshot().await).await {
        warn!("Failed to send initial snapshot: {}", e);
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<WsCommand>(text.as_str()) {
                            Ok(cmd) => match cmd.into_playback() {
                                // The resulting update arrives through the broadcast.
                                Some(command) => {
                                    controller.dispatch(command).await;
                                }
                                None => {
                                    if let Err(e) = send_json(&mut socket, &controller.snapshot().await).await {
                                        warn!("Failed to send snapshot: {}", e);
                                        break;
                                    }
                                }
                            },
                            Err(e) => debug!("Ignoring malformed command {:?}: {}", text.as_str(), e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = socket.send(Message::Pong(data)).await {
                            warn!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            update = updates.recv() => {
                let update: PlaybackUpdate = match update {
                    Ok(update) => update,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "WebSocket client lagged, resending snapshot");
                        controller.snapshot().await
                    }
                    Err(RecvError::Closed) => break,
                };
                if let Err(e) = send_json(&mut socket, &update).await {
                    warn!("Failed to send update: {}", e);
                    break;
                }
            }
        }
    }
}
