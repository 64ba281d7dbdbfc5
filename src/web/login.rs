//! One-shot browser login
//!
//! Serves a credential form on a local listener. The first POST whose
//! credentials exactly match a user fulfils a one-slot channel; the console
//! waits on that slot (without timeout) and then shuts the listener down.
//! Later successful posts are answered but cannot replace the first user.

use crate::types::{LedgerError, User};
use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

const FORM_PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="UTF-8">
<title>Sign in</title>
</head>
<body>
<h2>Enter your credentials</h2>
<form method="post">
<input name="username" placeholder="Username" required><br><br>
<input name="password" type="password" placeholder="Password" required><br><br>
<button type="submit">Sign in</button>
</form>
{error}
</body>
</html>
"#;

const ERROR_MESSAGE: &str = "<p style='color:red'>Invalid credentials</p>";

const SUCCESS_PAGE: &str = "<h3>Signed in. You can close this window.</h3>\
<script>setTimeout(() => window.close(), 1000);</script>";

const ALREADY_SIGNED_IN_PAGE: &str = "<h3>A session is already open.</h3>";

/// Submitted form fields
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone)]
struct LoginState {
    users: Arc<Vec<User>>,
    slot: Arc<Mutex<Option<oneshot::Sender<User>>>>,
}

fn form_page(error: &str) -> Html<String> {
    Html(FORM_PAGE.replace("{error}", error))
}

async fn show_form() -> Html<String> {
    form_page("")
}

async fn submit(State(state): State<LoginState>, Form(credentials): Form<Credentials>) -> Html<String> {
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.matches(&credentials.username, &credentials.password))
    else {
        warn!(username = %credentials.username, "login rejected");
        return form_page(ERROR_MESSAGE);
    };

    let sender = match state.slot.lock() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };

    let delivered = sender.is_some_and(|sender| sender.send(user.clone()).is_ok());
    if !delivered {
        return Html(ALREADY_SIGNED_IN_PAGE.to_string());
    }

    info!(username = %user.username, "login accepted");
    Html(SUCCESS_PAGE.to_string())
}

/// Build the login router
///
/// Returns the router and the receiving end of the one-slot channel that the
/// first successful login fulfils.
pub fn router(users: Vec<User>) -> (Router, oneshot::Receiver<User>) {
    let (sender, receiver) = oneshot::channel();
    let state = LoginState {
        users: Arc::new(users),
        slot: Arc::new(Mutex::new(Some(sender))),
    };

    let router = Router::new()
        .route("/", get(show_form).post(submit))
        .with_state(state);

    (router, receiver)
}

/// Serve the login page on `listener` until one user signs in
///
/// Blocks (asynchronously) with no timeout. The listener is shut down before
/// the authenticated user is returned.
///
/// # Errors
///
/// Returns `Login` if the server stops before anyone signed in.
pub async fn await_login(listener: TcpListener, users: Vec<User>) -> Result<User, LedgerError> {
    let addr = listener.local_addr()?;
    let (router, login) = router(users);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });
    info!("Login page listening on http://{}", addr);

    let user = login.await.map_err(|_| LedgerError::Login {
        message: "login page closed before anyone signed in".to_string(),
    });

    let _ = shutdown_tx.send(());
    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("login server failed: {e}"),
        Err(e) => warn!("login server task failed: {e}"),
    }

    user
}
