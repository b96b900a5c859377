//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands;
use crate::Handbook;

/// Live reload script injected before `</body>`
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the development server
pub async fn start(
    handbook: &Handbook,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: handbook.public_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Server running at {}", url);
    if watch {
        tracing::info!("Live reload enabled");
    }

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let handbook = handbook.clone();
        tokio::task::spawn_blocking(move || {
            let notify_browsers = || {
                let _ = reload_tx.send(());
            };
            if let Err(e) = commands::generate::watch_blocking(&handbook, notify_browsers) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the public directory, injecting the reload script into pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(file_path) = resolve_file(&state.public_dir, request.uri().path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to a file under the public directory
fn resolve_file(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let clean_path = request_path.trim_start_matches('/');
    if clean_path.split('/').any(|segment| segment == "..") {
        return None;
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        return Some(candidate.join("index.html"));
    }
    if candidate.exists() {
        return Some(candidate);
    }

    let with_html = public_dir.join(format!("{}.html", clean_path.trim_end_matches('/')));
    if with_html.exists() {
        Some(with_html)
    } else {
        Some(candidate)
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
