mod common;

use common::MockTransport;
use noteshell_core::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use noteshell_core::{
    open_storage_in_memory, App, AppConfig, BootstrapError, Credentials, LocalStorage, View,
};
use serde_json::json;

fn app_with(transport: MockTransport) -> App<MockTransport> {
    App::assemble(
        AppConfig::default(),
        open_storage_in_memory().unwrap(),
        transport,
    )
    .unwrap()
}

#[test]
fn mount_succeeds_once_per_process() {
    let mut first = app_with(MockTransport::new());
    assert_eq!(first.mounted_at(), None);
    assert_eq!(first.mount().unwrap(), "#app");
    assert_eq!(first.mounted_at(), Some("#app"));

    let mut second = app_with(MockTransport::new());
    let err = second.mount().unwrap_err();
    assert!(matches!(err, BootstrapError::AlreadyMounted { ref target } if target == "#app"));
    assert_eq!(second.mounted_at(), None);
}

#[test]
fn assemble_restores_tokens_from_storage() {
    let mut storage = open_storage_in_memory().unwrap();
    storage
        .set_items(&[(ACCESS_TOKEN_KEY, "t1"), (REFRESH_TOKEN_KEY, "r1")])
        .unwrap();

    let mut app = App::assemble(AppConfig::default(), storage, MockTransport::new()).unwrap();

    assert!(app.session().is_authenticated());
    let outcome = app.navigate("/").unwrap();
    assert!(!outcome.was_redirected());
    assert_eq!(outcome.entered.view, View::Home);
}

#[test]
fn assemble_carries_config_into_components() {
    let config = AppConfig {
        auto_refresh: true,
        notify_timeout: std::time::Duration::from_millis(500),
        ..AppConfig::default()
    };
    let mut app =
        App::assemble(config, open_storage_in_memory().unwrap(), MockTransport::new()).unwrap();

    assert!(app.session().options().auto_refresh);
    assert_eq!(
        app.notifier_mut().timeout(),
        std::time::Duration::from_millis(500)
    );
}

#[tokio::test]
async fn guard_follows_session_through_login_and_logout() {
    let transport = MockTransport::new()
        .respond(201, json!({"access_token": "t1", "refresh_token": "r1"}));
    let mut app = app_with(transport);

    let outcome = app.navigate("/analytics").unwrap();
    assert!(outcome.was_redirected());
    assert_eq!(outcome.entered.path, "/auth");

    app.session_mut()
        .login(&Credentials::new("u@x.com", "p"))
        .await
        .unwrap();
    let outcome = app.navigate("/analytics").unwrap();
    assert!(!outcome.was_redirected());
    assert_eq!(app.router().current().map(|r| r.view), Some(View::Analytics));

    app.session_mut().logout().unwrap();
    let outcome = app.navigate("/").unwrap();
    assert_eq!(outcome.entered.view, View::Auth);
}
