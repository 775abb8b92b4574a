pub mod balance_client;
pub mod balances_response;
pub mod error;

pub use balance_client::BalanceClient;
pub use error::{ApiError, ApiErrorDetail};

pub const BALANCES_PATH: &str = "/account/balances";
pub const API_KEY_HEADER: &str = "X-API-Key";
