use axum::routing::{delete, get, post, put};
use axum::{middleware, Extension, Router};

use crate::kernel::Plugin;
use crate::plugins::auth::middleware::require_admin;
use crate::plugins::content::blog::handlers::*;
use crate::store::DynStore;

pub struct BlogPlugin {
    pub store: DynStore,
}

impl BlogPlugin {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Plugin for BlogPlugin {
    async fn router(&self) -> Router {
        // reads are the public site; writes are the admin panel
        let public = Router::new()
            .route("/", get(list_posts))
            .route("/slug/:slug", get(get_post_by_slug))
            .route("/:id", get(get_post));

        let admin = Router::new()
            .route("/", post(create_post))
            .route("/:id", put(update_post))
            .route("/:id", delete(delete_post))
            .layer(middleware::from_fn(require_admin));

        public.merge(admin).layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str { "content/blog" }
}
