use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use sqlx::AnyPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::{Dialect, Entity, Group, Person, Storage};
use crate::handlers::resource;

/// Service context shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: AnyPool,
    pub dialect: Dialect,
}

impl AppState {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub fn storage<E: Entity>(&self) -> Storage<E> {
        Storage::new(self.pool.clone(), self.dialect)
    }
}

/// `/{table}` and `/{table}/{id}` for one entity.
fn resource_routes<E: Entity>(router: Router<AppState>) -> Router<AppState> {
    let collection = format!("/{}", E::TABLE);
    let item = format!("/{}/{{id}}", E::TABLE);
    router
        .route(
            &collection,
            post(resource::create::<E>).get(resource::list::<E>),
        )
        .route(
            &item,
            get(resource::get::<E>)
                .put(resource::update::<E>)
                .delete(resource::delete::<E>),
        )
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

pub fn centro_router(state: AppState) -> Router {
    let router = resource_routes::<Person>(Router::new());
    resource_routes::<Group>(router)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
