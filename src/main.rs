use tureen::{create_router, AppState, Config, DbClient};

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        tureen::api::handlers::auth::signup,
        tureen::api::handlers::auth::signin,
        tureen::api::handlers::recipes::create_recipe,
        tureen::api::handlers::recipes::get_recipe,
        tureen::api::handlers::recipes::list_recipes,
        tureen::api::handlers::recipes::update_recipe,
        tureen::api::handlers::recipes::delete_recipe,
    ),
    components(schemas(
        tureen::types::SignUpRequest,
        tureen::types::SignInRequest,
        tureen::types::JwtResponse,
        tureen::types::MessageResponse,
        tureen::types::Recipe,
        tureen::types::Ingredient,
        tureen::types::RecipeDraft,
        tureen::types::IngredientDraft,
        tureen::types::FieldViolation,
    )),
    tags(
        (name = "auth", description = "User registration and sign-in"),
        (name = "recipes", description = "Recipe CRUD operations")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tureen=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let db = DbClient::open(&config.database.path).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db);

    let app = create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Without the interactive UI the raw document is still served.
    #[cfg(not(feature = "swagger-ui"))]
    let app = {
        use axum::{routing::get, Json};
        let openapi = ApiDoc::openapi();
        app.route(
            "/api-docs/openapi.json",
            get(move || async move { Json(openapi) }),
        )
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("tureen-server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
