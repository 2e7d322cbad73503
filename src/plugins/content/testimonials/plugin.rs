use axum::routing::{delete, get, post, put};
use axum::{middleware, Extension, Router};

use crate::kernel::Plugin;
use crate::plugins::auth::middleware::require_admin;
use crate::plugins::content::testimonials::handlers::*;
use crate::store::DynStore;

pub struct TestimonialsPlugin {
    pub store: DynStore,
}

impl TestimonialsPlugin {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Plugin for TestimonialsPlugin {
    async fn router(&self) -> Router {
        let public = Router::new()
            .route("/", get(list_testimonials))
            .route("/featured", get(list_featured))
            .route("/:id", get(get_testimonial));

        let admin = Router::new()
            .route("/", post(create_testimonial))
            .route("/:id", put(update_testimonial))
            .route("/:id", delete(delete_testimonial))
            .layer(middleware::from_fn(require_admin));

        public.merge(admin).layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str { "content/testimonials" }
}
