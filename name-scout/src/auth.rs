//! First-run credential setup over a loopback HTTP listener.
//!
//! When no API key is configured, a small form is served on an ephemeral
//! 127.0.0.1 port. Each submitted key is validated with a live request
//! before anything else happens: a rejected key gets an error response and
//! the window stays open for another attempt, while a valid key is sent
//! back over a oneshot channel, persisted to the config file, and ends the
//! flow. The whole window times out after five minutes.

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use name_scout_lib::{validate_api_key, ConfigManager, NameCheckError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tracing::debug;

const AUTH_TIMEOUT: Duration = Duration::from_secs(300);

struct AuthState {
    sender: Mutex<Option<oneshot::Sender<String>>>,
}

#[derive(Deserialize)]
struct AuthRequest {
    api_key: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct AuthResponse {
    ok: bool,
    message: &'static str,
}

/// Capture, validate, and persist an API key. Returns the key on success.
pub async fn run_auth_flow(config: &ConfigManager) -> Result<String, NameCheckError> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| NameCheckError::credential(format!("cannot open auth listener: {}", e)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| NameCheckError::credential(format!("cannot read auth address: {}", e)))?;

    let (tx, rx) = oneshot::channel();
    let state = Arc::new(AuthState {
        sender: Mutex::new(Some(tx)),
    });

    let router = Router::new()
        .route("/", get(auth_page))
        .route("/auth", post(receive_key))
        .with_state(state);

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    println!("No API key configured.");
    println!("Open http://{} in your browser and paste your Anthropic API key.", addr);
    println!("Waiting up to 5 minutes...");
    println!();

    // The channel only ever carries an already-validated key.
    let key = match tokio::time::timeout(AUTH_TIMEOUT, rx).await {
        Ok(Ok(key)) => key,
        Ok(Err(_)) => {
            server.abort();
            return Err(NameCheckError::credential("auth listener closed unexpectedly"));
        }
        Err(_) => {
            server.abort();
            return Err(NameCheckError::credential(
                "timed out waiting for a valid API key (5 minutes)",
            ));
        }
    };
    server.abort();

    config.save_api_key(&key)?;
    println!("API key saved.");
    println!();
    Ok(key)
}

async fn auth_page() -> Html<&'static str> {
    Html(AUTH_PAGE)
}

async fn receive_key(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<AuthRequest>,
) -> Json<AuthResponse> {
    let response = process_submission(&state.sender, &request.api_key, |key| async move {
        debug!("validating submitted API key");
        validate_api_key(&key).await
    })
    .await;
    Json(response)
}

/// Handle one key submission against the completion slot.
///
/// The sender is consumed only after the key validates; a rejected or
/// empty key leaves the slot intact so the user can retry within the
/// window. The slot lock is held across validation so concurrent
/// submissions are serialized.
async fn process_submission<F, Fut>(
    slot: &Mutex<Option<oneshot::Sender<String>>>,
    api_key: &str,
    validate: F,
) -> AuthResponse
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = bool>,
{
    let key = api_key.trim().to_string();
    if key.is_empty() {
        return AuthResponse {
            ok: false,
            message: "The key was empty. Paste your API key and try again.",
        };
    }

    let mut sender = slot.lock().await;
    if sender.is_none() {
        return AuthResponse {
            ok: false,
            message: "A key was already accepted.",
        };
    }

    if !validate(key.clone()).await {
        return AuthResponse {
            ok: false,
            message: "That key was rejected by the API. Check it and try again.",
        };
    }

    match sender.take() {
        Some(tx) => {
            let _ = tx.send(key);
            AuthResponse {
                ok: true,
                message: "Key accepted. Return to your terminal.",
            }
        }
        None => AuthResponse {
            ok: false,
            message: "A key was already accepted.",
        },
    }
}

const AUTH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>name-scout setup</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 32rem; margin: 4rem auto; }
    input { width: 100%; padding: 0.5rem; font-size: 1rem; }
    button { margin-top: 1rem; padding: 0.5rem 1.5rem; font-size: 1rem; }
    #status { margin-top: 1rem; }
  </style>
</head>
<body>
  <h1>name-scout</h1>
  <p>Paste your Anthropic API key to enable name generation.</p>
  <input id="key" type="password" placeholder="sk-ant-..." autofocus>
  <button onclick="submitKey()">Save</button>
  <p id="status"></p>
  <script>
    async function submitKey() {
      const key = document.getElementById('key').value;
      const res = await fetch('/auth', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ api_key: key }),
      });
      const body = await res.json();
      document.getElementById('status').textContent = body.message;
    }
  </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn slot() -> (Mutex<Option<oneshot::Sender<String>>>, oneshot::Receiver<String>) {
        let (tx, rx) = oneshot::channel();
        (Mutex::new(Some(tx)), rx)
    }

    #[tokio::test]
    async fn rejected_key_keeps_the_window_open_for_a_retry() {
        let (slot, mut rx) = slot();

        let first = process_submission(&slot, "not-a-key", |_| async { false }).await;
        assert!(!first.ok);
        assert!(slot.lock().await.is_some());
        assert!(rx.try_recv().is_err());

        let second = process_submission(&slot, "sk-valid", |_| async { true }).await;
        assert!(second.ok);
        assert_eq!(rx.try_recv().ok().as_deref(), Some("sk-valid"));
    }

    #[tokio::test]
    async fn only_a_validated_key_is_delivered() {
        let (slot, mut rx) = slot();

        let response = process_submission(&slot, "  sk-valid  ", |key| async move {
            key == "sk-valid"
        })
        .await;
        assert!(response.ok);
        assert_eq!(rx.try_recv().ok().as_deref(), Some("sk-valid"));
    }

    #[tokio::test]
    async fn empty_key_is_rejected_without_validation() {
        let (slot, _rx) = slot();
        let calls = AtomicUsize::new(0);

        let response = process_submission(&slot, "   ", |_| async {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        })
        .await;
        assert!(!response.ok);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(slot.lock().await.is_some());
    }

    #[tokio::test]
    async fn submissions_after_acceptance_are_refused() {
        let (slot, _rx) = slot();

        let first = process_submission(&slot, "sk-valid", |_| async { true }).await;
        assert!(first.ok);

        let calls = AtomicUsize::new(0);
        let second = process_submission(&slot, "sk-other", |_| async {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        })
        .await;
        assert!(!second.ok);
        // The window is closed before validation runs again
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
