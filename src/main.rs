use atrium_site_kernel::kernel::{build_app, Plugin};
use atrium_site_kernel::plugins::auth::{self, AuthPlugin};
use atrium_site_kernel::plugins::content::blog::BlogPlugin;
use atrium_site_kernel::plugins::content::team::TeamPlugin;
use atrium_site_kernel::plugins::content::testimonials::TestimonialsPlugin;
use atrium_site_kernel::plugins::health::HealthPlugin;
use atrium_site_kernel::store::{DynStore, InMemoryStore, PgStore};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenv().ok();

    // content lives in Postgres when configured, in memory otherwise
    let store: DynStore = match env::var("DATABASE_URL") {
        Ok(url) => PgStore::connect(&url).await?.into_arc(),
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; content will not survive restarts");
            InMemoryStore::new().into_arc()
        }
    };

    // the panel's admin account, created on first boot
    match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            auth::repo::ensure_seed_admin(&store, &email, &password).await?;
        }
        _ => tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seeding"),
    }

    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin),
        Box::new(AuthPlugin::new(store.clone())),
        Box::new(BlogPlugin::new(store.clone())),
        Box::new(TeamPlugin::new(store.clone())),
        Box::new(TestimonialsPlugin::new(store.clone())),
    ];

    let plugin_names: Vec<&'static str> = plugins.iter().map(|p| p.name()).collect();
    tracing::info!("mounting plugins: {:?}", plugin_names);

    let app = build_app(&plugins).await;

    let port: u16 = env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(3000);
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            for p in plugins.iter() {
                p.on_shutdown().await;
            }
        })
        .await?;

    Ok(())
}
