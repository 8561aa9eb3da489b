mod common;

use astro_application::{AppContext, Ports};
use astro_core::config::AppConfig;
use astro_core::realtime::RawEvent;
use astro_core::user::Role;
use common::{
    MockAuth, MockBackend, MockTransport, RecordingNavigator, RecordingToasts, profile, verified,
    wait_until,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_event_flows_from_socket_to_snackbar() {
    let backend = Arc::new(MockBackend::with_profile("t-1", profile("u-1", Role::Subscriber)));
    let auth = Arc::new(MockAuth::new(Some(verified("t-1"))));
    let transport = Arc::new(MockTransport::default());
    let log = transport.log.clone();

    let app = AppContext::new(
        &AppConfig::default(),
        Ports {
            auth: auth.clone(),
            backend: backend.clone(),
            transport,
            navigator: Arc::new(RecordingNavigator::default()),
            toasts: Arc::new(RecordingToasts::default()),
        },
    );
    app.start();

    assert!(wait_until(|| !log.emits().is_empty()).await);
    assert_eq!(log.emits()[0].2, json!("u-1"));

    log.push(0, RawEvent::new("post liked", json!("u-2")));
    assert!(
        wait_until(|| app
            .store()
            .snapshot()
            .is_some_and(|s| s.notifications().len() == 1))
        .await
    );
    assert_eq!(app.snackbar().current().message(), Some("liked your post"));

    app.account().logout().await.unwrap();
    assert!(wait_until(|| log.live() == 0).await);

    app.shutdown().await;
    assert!(app.scope().is_cancelled());
}
