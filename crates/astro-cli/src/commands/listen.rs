use anyhow::Result;
use astro_core::config::AppConfig;

use super::{AuthArgs, start_app, wait_for_session};

/// Runs the pipeline until Ctrl-C, printing every snackbar message.
pub async fn run(config: &AppConfig, auth: AuthArgs) -> Result<()> {
    let app = start_app(config, auth);
    wait_for_session(&app).await?;
    if let Some(session) = app.store().snapshot() {
        println!(
            "Signed in as {} ({} unread notifications). Press Ctrl-C to stop.",
            session.profile.name,
            session.notifications().len()
        );
    }

    let mut snackbar = app.snackbar().subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snackbar.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(message) = snackbar.borrow_and_update().message() {
                    println!("🔔 {}", message);
                }
            }
        }
    }

    app.shutdown().await;
    Ok(())
}
