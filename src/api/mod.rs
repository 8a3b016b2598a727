// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    gate::request_gate,
    models::{
        BalanceRequest, BalanceResponse, CountResponse, HealthResponse, RegisterRequest,
        RegisterResponse, RegisteredEntry, Registration,
    },
    state::AppState,
};

pub mod balance;
pub mod count;
pub mod health;
pub mod register;

/// Build the application router.
///
/// Every API route sits behind the request gate; CORS is the outermost
/// layer so OPTIONS preflights are answered before the gate runs. The
/// permissive CORS policy mirrors the original deployment.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/count", get(count::get_count))
        .route("/get-balance", post(balance::get_balance))
        .route("/register", post(register::register))
        .route("/health", get(health::health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_gate,
        ))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        count::get_count,
        balance::get_balance,
        register::register,
        health::health
    ),
    components(
        schemas(
            Registration,
            BalanceRequest,
            BalanceResponse,
            RegisterRequest,
            RegisterResponse,
            RegisteredEntry,
            CountResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "Waitlist", description = "Balance-gated waitlist signup"),
        (name = "Health", description = "Service probes")
    )
)]
struct ApiDoc;
