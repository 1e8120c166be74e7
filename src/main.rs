//! FiuFit users service binary.
//!
//! Loads configuration, wires adapters to ports and serves the REST API.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fiufit_users::adapters::external::{
    HttpIdentityProvider, HttpMetricsSink, HttpNotificationSink, IdentityClientConfig,
    TwilioConfig, TwilioWhatsAppChannel,
};
use fiufit_users::adapters::http::{router, AppState, HandlerSettings};
use fiufit_users::adapters::memory::{
    InMemoryAdminStore, InMemoryCertificationStore, InMemoryDirectory, InMemoryIdentityProvider,
    InMemoryVerificationPinStore, RecordingMessagingChannel, RecordingMetricsSink,
    RecordingNotificationSink,
};
use fiufit_users::adapters::postgres::{
    PostgresAdminRepository, PostgresCertificationRepository, PostgresUserRepository,
    PostgresVerificationPinRepository,
};
use fiufit_users::adapters::security::{Argon2Hasher, JwtTokenIssuer};
use fiufit_users::config::AppConfig;
use fiufit_users::ports::{
    AdminRepository, CertificationRepository, FollowRepository, IdentityProvider,
    MessagingChannel, MetricsSink, NotificationSink, UserRepository, VerificationPinRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config);
    tracing::info!(
        environment = ?config.server.environment,
        api_version = %config.server.api_version,
        "Starting FiuFit users service"
    );

    let state = build_state(&config).await?;
    let app = router(
        state,
        &config.server.api_version,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

struct Storage {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    certifications: Arc<dyn CertificationRepository>,
    pins: Arc<dyn VerificationPinRepository>,
    admins: Arc<dyn AdminRepository>,
}

async fn build_storage(config: &AppConfig) -> Result<Storage> {
    let Some(url) = config.database.url.as_deref().filter(|_| config.database.is_configured())
    else {
        tracing::warn!("No database configured, state is kept in memory");
        let directory = Arc::new(InMemoryDirectory::new());
        return Ok(Storage {
            users: directory.clone(),
            follows: directory,
            certifications: Arc::new(InMemoryCertificationStore::new()),
            pins: Arc::new(InMemoryVerificationPinStore::new()),
            admins: Arc::new(InMemoryAdminStore::new()),
        });
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    Ok(Storage {
        users: users.clone(),
        follows: users,
        certifications: Arc::new(PostgresCertificationRepository::new(pool.clone())),
        pins: Arc::new(PostgresVerificationPinRepository::new(pool.clone())),
        admins: Arc::new(PostgresAdminRepository::new(pool)),
    })
}

async fn build_state(config: &AppConfig) -> Result<AppState> {
    let storage = build_storage(config).await?;

    let identity: Arc<dyn IdentityProvider> = match (
        config.identity.base_url.as_deref(),
        config.identity.api_key.clone(),
    ) {
        (Some(base_url), Some(api_key)) if config.identity.is_configured() => {
            Arc::new(HttpIdentityProvider::new(IdentityClientConfig {
                base_url: base_url.to_string(),
                api_key,
                storage_base_url: config.identity.storage_base_url.clone(),
            }))
        }
        _ => {
            tracing::warn!("No identity provider configured, using in-memory accounts");
            Arc::new(InMemoryIdentityProvider::new(
                config.identity.storage_base_url.clone(),
            ))
        }
    };

    let notifications: Arc<dyn NotificationSink> = match config.notifications.base_url.as_deref() {
        Some(base_url) if config.notifications.is_configured() => Arc::new(
            HttpNotificationSink::new(base_url, &config.notifications.api_version),
        ),
        _ => {
            tracing::warn!("No notification service configured, notifications are only recorded");
            Arc::new(RecordingNotificationSink::new())
        }
    };

    let metrics: Arc<dyn MetricsSink> = match config.metrics.base_url.as_deref() {
        Some(base_url) if config.metrics.is_configured() => {
            Arc::new(HttpMetricsSink::new(base_url, &config.metrics.api_version))
        }
        _ => {
            tracing::warn!("No metrics service configured, metrics are only recorded");
            Arc::new(RecordingMetricsSink::new())
        }
    };

    let messaging: Arc<dyn MessagingChannel> = match (
        config.messaging.twilio_account_sid.clone(),
        config.messaging.twilio_auth_token.clone(),
        config.messaging.twilio_from_number.clone(),
    ) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => {
            Arc::new(TwilioWhatsAppChannel::new(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            }))
        }
        _ => {
            tracing::warn!("No Twilio credentials configured, pins are only recorded");
            Arc::new(RecordingMessagingChannel::new())
        }
    };

    Ok(AppState {
        users: storage.users,
        follows: storage.follows,
        certifications: storage.certifications,
        pins: storage.pins,
        admins: storage.admins,
        identity,
        notifications,
        metrics,
        messaging,
        hasher: Arc::new(Argon2Hasher::new()),
        tokens: Arc::new(JwtTokenIssuer::new(&config.security.jwt_secret)),
        settings: HandlerSettings {
            side_effect_timeout: config.server.side_effect_timeout(),
            pin_ttl_secs: config.verification.pin_ttl_secs,
            token_ttl_hours: config.security.token_ttl_hours,
        },
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
