use axum::routing::{delete, get, post, put};
use axum::{middleware, Extension, Router};

use crate::kernel::Plugin;
use crate::plugins::auth::middleware::require_admin;
use crate::plugins::content::team::handlers::*;
use crate::store::DynStore;

pub struct TeamPlugin {
    pub store: DynStore,
}

impl TeamPlugin {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Plugin for TeamPlugin {
    async fn router(&self) -> Router {
        let public = Router::new()
            .route("/", get(list_members))
            .route("/:id", get(get_member));

        let admin = Router::new()
            .route("/", post(create_member))
            .route("/:id", put(update_member))
            .route("/:id", delete(delete_member))
            .layer(middleware::from_fn(require_admin));

        public.merge(admin).layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str { "content/team" }
}
