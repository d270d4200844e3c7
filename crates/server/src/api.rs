use crate::provider::{self, PROVIDER_TAG, ProviderState};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_redoc::{Redoc, Servable};

const MISC_TAG: &str = "Miscellaneous";

#[utoipa::path(
    get,
    path = "/health",
    tag = MISC_TAG,
    operation_id = "Health Check",
    responses(
        (status = 200, description = "Service is alive", content_type = "text/plain")
    ),
)]
async fn health() -> &'static str {
    "OK"
}

pub async fn start_webserver(state: ProviderState) -> color_eyre::Result<()> {
    let listen_addr = state.config.listen_addr.clone();

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/provider", provider::router(state))
        .routes(routes!(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .split_for_parts();

    let router = router.merge(Redoc::with_url("/api-docs", api));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("Server running on http://{listen_addr}");
    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            let bearer = HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .description(Some(
                    "Access token obtained from the `/provider/authorize` endpoint.",
                ))
                .build();
            components.add_security_scheme("bearer_auth", SecurityScheme::Http(bearer));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Authorization Provider API",
        version = "1.0.0",
        description = "OAuth2-style authorization provider issuing codes and access tokens to registered client applications."
    ),
    tags(
        (name = MISC_TAG, description = "Miscellaneous endpoints"),
        (name = PROVIDER_TAG, description = "Grant issuance and introspection endpoints")
    )
)]
struct ApiDoc;
