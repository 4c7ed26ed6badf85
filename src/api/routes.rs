use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Builds the API router: public auth routes plus recipe routes guarded by
/// the bearer-token middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/api/auth/signup", post(crate::api::handlers::auth::signup))
        .route("/api/auth/signin", post(crate::api::handlers::auth::signin));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route(
            "/api/recipes",
            post(crate::api::handlers::recipes::create_recipe)
                .get(crate::api::handlers::recipes::list_recipes),
        )
        .route(
            "/api/recipes/{id}",
            get(crate::api::handlers::recipes::get_recipe)
                .put(crate::api::handlers::recipes::update_recipe)
                .delete(crate::api::handlers::recipes::delete_recipe),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    public_routes.merge(protected_routes).with_state(state)
}
