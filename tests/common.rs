use atrium_site_kernel::kernel::{build_app, Plugin};
use atrium_site_kernel::plugins::auth::repo::ensure_seed_admin;
use atrium_site_kernel::store::{DynStore, InMemoryStore};
use std::sync::Once;
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "admin@atrium.example";
pub const ADMIN_PASSWORD: &str = "a-long-test-password";
const JWT_SECRET_CONST: &str = "atrium-test-secret";

static ENV_INIT: Once = Once::new();

#[allow(dead_code)]
pub fn test_store() -> DynStore {
    InMemoryStore::new().into_arc()
}

pub async fn spawn_app(
    plugins: Vec<Box<dyn Plugin>>,
) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    ENV_INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", JWT_SECRET_CONST);
    });
    let app = build_app(&plugins).await;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    Ok((format!("http://{}", addr), handle))
}

#[allow(dead_code)]
pub async fn seed_and_login(
    store: &DynStore,
    client: &reqwest::Client,
    base: &str,
) -> anyhow::Result<String> {
    ensure_seed_admin(store, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(resp.status().is_success(), "login failed: {}", resp.status());
    let body: serde_json::Value = resp.json().await?;
    Ok(body["token"].as_str().expect("token in login response").to_string())
}

#[allow(dead_code)]
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[allow(dead_code)]
pub fn png_part() -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(PNG_BYTES.to_vec())
        .file_name("cover.png")
        .mime_str("image/png")
        .expect("valid mime")
}
