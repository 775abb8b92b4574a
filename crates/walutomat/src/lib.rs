pub mod config;
pub mod remote;
pub mod traits;

pub use config::{ClientConfig, ConfigError};
pub use remote::{ApiError, ApiErrorDetail, BalanceClient};
pub use traits::BalanceSource;
