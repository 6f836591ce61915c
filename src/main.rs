use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

use agora_reputation::{
    create_admin_router, create_reputation_router, AdminApiState, AdminGate, DatabasePool,
    EngineConfig, ReputationApiState, ReputationEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(EngineConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        eprintln!("Please check AGORA_* environment variables.");
        e
    })?);

    init_logging(&config)?;

    info!("Starting Agora Reputation Engine");
    info!(
        "Scoring: vote weight {}, proposal weight {}, streak bonus {}% at {} events, max score {}",
        config.scoring.vote_weight,
        config.scoring.proposal_weight,
        config.scoring.streak_bonus_multiplier,
        config.scoring.streak_bonus_threshold,
        config.scoring.max_score
    );

    let gate = Arc::new(AdminGate::new(config.admin.owner.clone()));
    let clock = Arc::new(config.to_clock());

    let mut engine = ReputationEngine::new(gate.clone(), config.scoring.to_params());

    if config.database.postgres_enabled {
        let db = DatabasePool::new(&config.database.postgres_url)
            .await
            .map_err(|e| anyhow::anyhow!("Database initialization failed: {}", e))?;
        db.init_schema()
            .await
            .map_err(|e| anyhow::anyhow!("Schema initialization failed: {}", e))?;
        engine = engine.with_database(Arc::new(db));
        info!("PostgreSQL durability enabled");
    } else {
        info!("Running with in-memory state only");
    }

    let engine = Arc::new(engine);
    engine.hydrate().await;

    info!(
        "Ledger clock at height {} ({}s blocks)",
        clock.height(),
        config.chain.block_seconds
    );

    let app = Router::new()
        .merge(create_reputation_router(ReputationApiState {
            engine: engine.clone(),
            clock: clock.clone(),
        }))
        .nest(
            "/admin",
            create_admin_router(AdminApiState { gate: gate.clone() }),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!("Reputation engine listening on {}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_logging(config: &EngineConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(if config.logging.log_requests {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
