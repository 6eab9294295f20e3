use crate::{
    backend::{config::ResepConfig, utils::error::BackendResult},
    frontend::{
        api::GatewayConfig,
        app::{shell, App},
    },
};
use assets::file_and_error_handler;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Extension,
    Router,
};
use leptos::{config::get_config_from_str, prelude::*};
use leptos_axum::{generate_route_list, LeptosRoutes};
use log::info;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

mod assets;
pub mod config;
pub mod utils;

pub async fn start(config: ResepConfig) -> BackendResult<()> {
    let mut leptos_options = get_config_from_str(include_str!("../../Cargo.toml"))?;
    leptos_options.site_addr = config.bind;
    let addr = leptos_options.site_addr;
    let gateway: GatewayConfig = config.gateway.into();
    info!("Using gateway at {}", gateway.url);

    let routes = generate_route_list(App);
    let app = Router::new()
        .leptos_routes_with_handler(routes, get(leptos_routes_handler))
        .fallback(file_and_error_handler)
        .with_state(leptos_options)
        .layer(Extension(gateway))
        .layer(CompressionLayer::new());

    info!("Listening on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Make the gateway settings available while rendering, so that they end up in the page
async fn leptos_routes_handler(
    Extension(gateway): Extension<GatewayConfig>,
    State(leptos_options): State<LeptosOptions>,
    request: Request<Body>,
) -> Response {
    let leptos_options_ = leptos_options.clone();
    let handler = leptos_axum::render_app_async_with_context(
        move || {
            provide_context(leptos_options_.clone());
            provide_context(gateway.clone());
        },
        move || shell(leptos_options.clone()),
    );

    handler(request).await.into_response()
}
