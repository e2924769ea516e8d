//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::weather::{WeatherClient, WeatherError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    weather: WeatherClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the weather HTTP client cannot be built.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, WeatherError> {
        let weather = WeatherClient::new(&config.weather)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                weather,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the weather API client.
    #[must_use]
    pub fn weather(&self) -> &WeatherClient {
        &self.inner.weather
    }
}
