use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// JSON map of municipality id to land area (sq km), loaded into the
    /// `StatisticsContext` by embedders that want population densities.
    pub land_areas_file: Option<PathBuf>,
    /// Log snapshot sizes at info level instead of debug.
    pub verbose_snapshots: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("LGU_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Defaults per environment, then specific env overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LGU_LAND_AREAS_FILE") {
            self.stats.land_areas_file = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("LGU_STATS_VERBOSE_SNAPSHOTS") {
            self.stats.verbose_snapshots = v.parse().unwrap_or(self.stats.verbose_snapshots);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            stats: StatsConfig {
                land_areas_file: None,
                verbose_snapshots: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            stats: StatsConfig {
                land_areas_file: None,
                verbose_snapshots: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            stats: StatsConfig {
                land_areas_file: None,
                verbose_snapshots: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
