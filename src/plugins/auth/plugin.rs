use async_trait::async_trait;
use axum::routing::{get, post};
use axum::{middleware, Extension, Router};

use crate::kernel::Plugin;
use crate::plugins::auth::handlers;
use crate::store::DynStore;

pub struct AuthPlugin {
    store: DynStore,
}

impl AuthPlugin {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Plugin for AuthPlugin {
    async fn router(&self) -> Router {
        let public = Router::new().route("/login", post(handlers::login));

        let protected = Router::new()
            .route("/logout", post(handlers::logout))
            .route("/me", get(handlers::me))
            .layer(middleware::from_fn(crate::plugins::auth::middleware::require_admin));

        public.merge(protected).layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str { "auth" }
}
