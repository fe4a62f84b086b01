//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod announcements;
pub mod auth;
pub mod financials;
pub mod health;
pub mod leave;
pub mod meetings;
pub mod messages;
pub mod onboarding;
pub mod operations;
pub mod performance;
pub mod properties;
pub mod reports;
pub mod sales;
pub mod tasks;
pub mod time;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(announcements::routes())
        .merge(messages::routes())
        .merge(leave::routes())
        .merge(time::routes())
        .merge(tasks::routes())
        .merge(properties::routes())
        .merge(sales::routes())
        .merge(financials::routes())
        .merge(meetings::routes())
        .merge(performance::routes())
        .merge(onboarding::routes())
        .merge(operations::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
