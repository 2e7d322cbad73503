mod common;
use common::{seed_and_login, spawn_app, test_store, ADMIN_EMAIL, ADMIN_PASSWORD};

use atrium_site_kernel::kernel::Plugin;
use atrium_site_kernel::plugins::auth::repo::ensure_seed_admin;
use atrium_site_kernel::plugins::auth::AuthPlugin;
use atrium_site_kernel::plugins::content::blog::BlogPlugin;
use atrium_site_kernel::plugins::health::HealthPlugin;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_rejects_bad_credentials() -> anyhow::Result<()> {
    let store = test_store();
    let plugins: Vec<Box<dyn Plugin>> =
        vec![Box::new(HealthPlugin), Box::new(AuthPlugin::new(store.clone()))];
    let (base, handle) = spawn_app(plugins).await?;
    let client = reqwest::Client::new();

    ensure_seed_admin(&store, ADMIN_EMAIL, ADMIN_PASSWORD).await?;

    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "email": ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "invalid_credentials");

    // unknown email fails the same way, no account probing
    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "email": "nobody@atrium.example", "password": ADMIN_PASSWORD }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    handle.abort();
    let _ = handle.await;
    Ok(())
}

#[tokio::test]
async fn session_lifecycle_login_me_logout() -> anyhow::Result<()> {
    let store = test_store();
    let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(AuthPlugin::new(store.clone()))];
    let (base, handle) = spawn_app(plugins).await?;
    let client = reqwest::Client::new();

    let token = seed_and_login(&store, &client, &base).await?;

    let me = client
        .get(format!("{}/auth/me", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = me.json().await?;
    assert_eq!(body["email"], ADMIN_EMAIL);

    let logout = client
        .post(format!("{}/auth/logout", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    // the token still carries a valid signature, but its session is gone
    let me_again = client
        .get(format!("{}/auth/me", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(me_again.status(), StatusCode::UNAUTHORIZED);

    handle.abort();
    let _ = handle.await;
    Ok(())
}

#[tokio::test]
async fn write_routes_are_gated() -> anyhow::Result<()> {
    let store = test_store();
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(AuthPlugin::new(store.clone())),
        Box::new(BlogPlugin::new(store.clone())),
    ];
    let (base, handle) = spawn_app(plugins).await?;
    let client = reqwest::Client::new();

    // no token
    let resp = client
        .post(format!("{}/content/blog", base))
        .multipart(reqwest::multipart::Form::new().text("title", "x"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // garbage token
    let resp = client
        .post(format!("{}/content/blog", base))
        .bearer_auth("not-a-real-token")
        .multipart(reqwest::multipart::Form::new().text("title", "x"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // a logged-out token is dead for writes too
    let token = seed_and_login(&store, &client, &base).await?;
    client
        .post(format!("{}/auth/logout", base))
        .bearer_auth(&token)
        .send()
        .await?;
    let resp = client
        .post(format!("{}/content/blog", base))
        .bearer_auth(&token)
        .multipart(reqwest::multipart::Form::new().text("title", "x"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // reads stay public
    let resp = client.get(format!("{}/content/blog", base)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    handle.abort();
    let _ = handle.await;
    Ok(())
}
