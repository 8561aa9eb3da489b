pub mod badge;
pub mod config;
pub mod listen;
pub mod logging;
pub mod settings;

use anyhow::{Context, Result, bail};
use astro_application::{AppContext, Ports};
use astro_core::config::AppConfig;
use astro_core::navigation::{NavigationTarget, Navigator};
use astro_core::toast::{Toast, ToastKind, ToastPresenter};
use astro_infrastructure::{HttpBackend, SocketIoTransport, StaticTokenAuthProvider};
use std::sync::Arc;
use std::time::Duration;

const SESSION_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(clap::Args)]
pub struct AuthArgs {
    /// Access token issued by the auth provider
    #[arg(long, env = "ASTRO_TOKEN")]
    pub token: String,
    /// Email of the signed-in account
    #[arg(long, env = "ASTRO_EMAIL", default_value = "")]
    pub email: String,
}

/// Navigator for a terminal: reports the transition instead of drawing it.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, target: NavigationTarget) {
        let pending: Vec<&str> = target.pending_queue.iter().map(|s| s.as_str()).collect();
        tracing::info!(screen = %target.screen, ?pending, "navigate");
    }
}

struct LogToasts;

impl ToastPresenter for LogToasts {
    fn show_toast(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => println!("✔ {}: {}", toast.title, toast.body),
            ToastKind::Error => eprintln!("✘ {}: {}", toast.title, toast.body),
        }
    }
}

/// Builds the pipeline against the real backend and starts it.
pub fn start_app(config: &AppConfig, auth: AuthArgs) -> AppContext {
    let ports = Ports {
        auth: Arc::new(StaticTokenAuthProvider::new(auth.token, auth.email)),
        backend: Arc::new(HttpBackend::from_config(&config.api)),
        transport: Arc::new(SocketIoTransport::default()),
        navigator: Arc::new(LogNavigator),
        toasts: Arc::new(LogToasts),
    };
    let app = AppContext::new(config, ports);
    app.start();
    app
}

/// Waits until the auth bridge has installed a session.
pub async fn wait_for_session(app: &AppContext) -> Result<()> {
    let mut sessions = app.store().subscribe();
    let ready = tokio::time::timeout(SESSION_TIMEOUT, sessions.wait_for(Option::is_some))
        .await
        .context("timed out waiting for the backend to load the user")?;
    if ready.is_err() {
        bail!("session store closed before sign-in completed");
    }
    Ok(())
}
