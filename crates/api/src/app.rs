use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use domain::models::SectionScope;
use persistence::Databases;
use shared::jwt::SessionTokens;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_session, trace_id};
use crate::routes::{
    auth, backup, discounts, health, info, method_not_allowed, news, rules, sections, store, users,
};

#[derive(Clone)]
pub struct AppState {
    pub databases: Databases,
    pub config: Arc<Config>,
    /// `None` while no signing secret is configured; login is then refused.
    pub tokens: Option<Arc<SessionTokens>>,
}

impl AppState {
    pub fn new(config: Config, databases: Databases) -> Self {
        let tokens = match SessionTokens::with_leeway(
            &config.auth.jwt_secret,
            config.auth.session_expiry_secs,
            config.auth.leeway_secs,
        ) {
            Ok(tokens) => Some(Arc::new(tokens)),
            Err(e) => {
                warn!(error = %e, "Session tokens disabled; admin login is unavailable");
                None
            }
        };

        Self {
            databases,
            config: Arc::new(config),
            tokens,
        }
    }
}

/// Only the listed method is served; anything else gets a JSON 405 before
/// any handler runs.
fn only<S: Clone + Send + Sync + 'static>(router: MethodRouter<S>) -> MethodRouter<S> {
    router.fallback(method_not_allowed)
}

/// Like [`only`], with the session guard around the served methods when
/// `auth.enforce_admin_session` is set. Unserved methods still get 405.
fn guarded(state: &AppState, router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    let router = if state.config.auth.enforce_admin_session {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_session))
    } else {
        router
    };
    only(router)
}

fn section_admin_routes(state: &AppState, path: &str, scope: SectionScope) -> Router<AppState> {
    Router::new()
        .route(
            path,
            guarded(
                state,
                get(sections::list_sections)
                    .post(sections::create_admin_section)
                    .put(sections::update_admin_section)
                    .delete(sections::delete_section),
            ),
        )
        .layer(Extension(scope))
}

pub fn create_app(config: Config, databases: Databases) -> Router {
    let state = AppState::new(config, databases);
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Serverless handlers kept at their historical paths.
    let mutation_routes = Router::new()
        .route("/api/news-create", guarded(&state, post(news::create_news)))
        .route("/api/news-update", guarded(&state, put(news::update_news)))
        .route(
            "/api/news",
            guarded(
                &state,
                post(news::create_news_ack)
                    .put(news::update_news_ack)
                    .delete(news::delete_news),
            ),
        )
        .route(
            "/api/section-create",
            guarded(&state, post(sections::create_section)),
        )
        .route(
            "/api/section-update",
            guarded(&state, put(sections::update_section)),
        )
        .route("/api/user-delete", guarded(&state, delete(users::delete_user)))
        .route("/api/user-update", guarded(&state, put(users::update_user)));

    let admin_routes = Router::new()
        .merge(section_admin_routes(
            &state,
            "/api/admin/sections",
            SectionScope::News,
        ))
        .merge(section_admin_routes(
            &state,
            "/api/admin/rule-sections",
            SectionScope::Rules,
        ))
        .route(
            "/api/admin/rules",
            guarded(
                &state,
                get(rules::list_rules)
                    .post(rules::create_rule)
                    .put(rules::update_rule)
                    .delete(rules::delete_rule),
            ),
        )
        .route(
            "/api/admin/store-sections",
            guarded(
                &state,
                get(store::list_store_sections)
                    .post(store::create_store_section)
                    .put(store::update_store_section)
                    .delete(store::delete_store_section),
            ),
        )
        .route(
            "/api/admin/packages",
            guarded(
                &state,
                get(store::list_packages)
                    .post(store::create_package)
                    .put(store::update_package)
                    .delete(store::delete_package),
            ),
        )
        .route(
            "/api/admin/discounts",
            guarded(
                &state,
                get(discounts::list_discounts)
                    .post(discounts::create_discount)
                    .put(discounts::update_discount)
                    .delete(discounts::delete_discount),
            ),
        )
        .route(
            "/api/admin/users",
            guarded(&state, get(users::list_users).post(users::create_user)),
        )
        .route(
            "/api/admin/info",
            guarded(&state, get(info::get_admin_info).put(info::update_info)),
        )
        .route("/api/admin/backup", guarded(&state, get(backup::export_backup)))
        .route(
            "/api/admin/backup/restore",
            guarded(&state, post(backup::restore_backup)),
        );

    let public_routes = Router::new()
        .route("/api/health", only(get(health::health_check)))
        .route("/api/health/live", only(get(health::live)))
        .route("/metrics", only(get(metrics_handler)))
        .route("/api/public/news", only(get(news::list_news)))
        .route(
            "/api/public/news/sections",
            only(get(sections::list_news_sections)),
        )
        .route("/api/public/rules", only(get(rules::list_public_rules)))
        .route("/api/public/rules/grouped", only(get(rules::grouped_rules)))
        .route(
            "/api/public/rules/sections/:section_id",
            only(get(rules::rules_by_section)),
        )
        .route("/api/public/store", only(get(store::storefront)))
        .route(
            "/api/public/discounts/active",
            only(get(discounts::active_discounts)),
        )
        .route("/api/public/info", only(get(info::get_public_info)));

    let auth_routes = Router::new()
        .route("/api/auth/login", only(post(auth::login)))
        .route("/api/auth/logout", only(post(auth::logout)))
        .route("/api/auth/session", only(get(auth::session)));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(mutation_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
