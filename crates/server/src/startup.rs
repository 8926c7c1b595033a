use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::context::{MutationContext, MutationPolicy};
use service::identity::http::HttpIdentityProvider;

use crate::routes::{self, ServerAuthConfig, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Identity-provider settings come from config.toml with env-var fallbacks;
/// the service cannot start without them.
fn load_identity_config(cfg: Option<&configs::AppConfig>) -> anyhow::Result<configs::IdentityConfig> {
    let mut identity = cfg.map(|c| c.identity.clone()).unwrap_or_default();
    identity.normalize_from_env();
    identity.validate()?;
    Ok(identity)
}

fn load_policy(cfg: Option<&configs::AppConfig>) -> MutationPolicy {
    let restrict_exam_delete = cfg
        .map(|c| c.server.restrict_exam_delete)
        .unwrap_or_else(|| {
            env::var("RESTRICT_EXAM_DELETE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        });
    MutationPolicy { restrict_exam_delete }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::load_default().ok();

    // DB connection: pool settings from config when present, env URL otherwise
    let db = match cfg.as_ref() {
        Some(c) => {
            let mut dbc = c.database.clone();
            dbc.normalize_from_env();
            match dbc.validate() {
                Ok(()) => models::db::connect_with_config(&dbc).await?,
                Err(_) => models::db::connect().await?,
            }
        }
        None => models::db::connect().await?,
    };

    // Identity provider client
    let identity_cfg = load_identity_config(cfg.as_ref())?;
    let identity = Arc::new(HttpIdentityProvider::new(
        &identity_cfg.base_url,
        &identity_cfg.secret_key,
        Duration::from_secs(identity_cfg.timeout_secs),
    )?);

    let policy = load_policy(cfg.as_ref());
    let ctx = MutationContext::new(db, identity).with_policy(policy);

    // JWT secret for session decoding
    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());
    let state = ServerState { ctx, auth: ServerAuthConfig { jwt_secret } };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, restrict_exam_delete = policy.restrict_exam_delete, "starting school admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
