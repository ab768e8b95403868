use anyhow::Result;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, health_check, init_pool};
use identity::{
    IdentityService,
    jwt::{JwtConfig, JwtService},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::PgUserStore,
};
use seating::{
    AppState,
    booking::{BookingService, BookingWindow, SeatResetScheduler},
    clock::{Clock, SystemClock},
    config::AppConfig,
    repositories::{BookingStore, PgBookingStore, PgContactStore, PgEventStore},
    routes, schema,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting seating service");

    let config = AppConfig::load()?;
    let db_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;

    let pool = init_pool(&db_config).await?;
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }
    schema::apply_schema(&pool).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.timezone));
    let booking_store: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(pool.clone()));

    if config.allow_admin_signup {
        warn!("ALLOW_ADMIN_SIGNUP is set; anyone can register an admin account");
    }
    let identity = IdentityService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        JwtService::new(jwt_config),
        RateLimiter::new(RateLimiterConfig::default()),
    )
    .with_admin_signup(config.allow_admin_signup);

    let state = AppState {
        bookings: BookingService::new(
            booking_store.clone(),
            BookingWindow::new(config.booking_open_hour, config.booking_close_hour),
        ),
        events: Arc::new(PgEventStore::new(pool.clone())),
        contacts: Arc::new(PgContactStore::new(pool)),
        identity,
        clock: clock.clone(),
    };

    let (scheduler, scheduler_shutdown) =
        SeatResetScheduler::new(booking_store, clock, config.seat_reset_hour);
    let scheduler_handle = tokio::spawn(scheduler.run());

    let app = routes::create_router(state);
    let listener = TcpListener::bind(config.server_addr.as_str()).await?;
    info!(
        addr = %config.server_addr,
        timezone = %config.timezone,
        open_hour = config.booking_open_hour,
        close_hour = config.booking_close_hour,
        reset_hour = config.seat_reset_hour,
        "Seating service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped, stopping seat reset scheduler");
    scheduler_shutdown.send(true).ok();
    if let Err(e) = scheduler_handle.await {
        error!(error = %e, "Seat reset scheduler task failed");
    }

    info!("Seating service shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received SIGTERM signal"),
    }
}
