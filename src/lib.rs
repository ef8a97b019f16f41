pub mod analytics;
pub mod config;
pub mod error;
pub mod sentinel;
pub mod stream;


pub use analytics::batch::{
    sz_ewm_mean, sz_ewm_mean_with, sz_rolling, sz_rolling_max, sz_rolling_mean, sz_rolling_min,
    sz_rolling_std, DEFAULT_PARALLEL_THRESHOLD,
};
pub use analytics::ewm::{ewm_mean, ewm_mean_incremental, ewm_mean_with, PaddingStrategy};
pub use analytics::primitives::DEFAULT_EPS;
pub use analytics::rolling::{rolling_max, rolling_mean, rolling_min, rolling_std, Statistic};
pub use analytics::windows::{effective_window_size, WindowParams};
pub use analytics::RollingEngine;
pub use config::RollingConfig;
pub use error::{ConfigError, RollingError};
pub use stream::{CircularBuffer, RollingSeries, StatsSnapshot};
