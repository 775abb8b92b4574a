use common::models::{Balance, BalanceSet, InvalidBalance};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::remote::error::{ApiError, ApiErrorDetail};
use crate::traits::RemoteResponse;

/// A single wallet entry. Accepts both the short field names and the
/// `balance*` names used by the live API.
#[derive(Debug, Deserialize)]
pub struct BalanceRecord {
    pub currency: String,
    #[serde(alias = "balanceAvailable")]
    pub available: Decimal,
    #[serde(default, alias = "balanceReserved")]
    pub reserved: Option<Decimal>,
}

impl RemoteResponse<Balance> for BalanceRecord {
    fn to_model(&self) -> Result<Balance, InvalidBalance> {
        Balance::new(
            &self.currency,
            self.available,
            self.reserved.unwrap_or(Decimal::ZERO),
        )
    }
}

/// `{"success": bool, "result": [...], "errors": [...]}`
#[derive(Debug, Deserialize)]
pub struct BalancesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub result: Option<Vec<BalanceRecord>>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

/// Maps the body of an HTTP 200 response. Either a bare list of records
/// or the envelope is accepted; anything else is malformed.
pub fn parse_balances(body: &str) -> Result<BalanceSet, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::malformed(body, e))?;

    let records = match value {
        Value::Array(_) => serde_json::from_value::<Vec<BalanceRecord>>(value)
            .map_err(|e| ApiError::malformed(body, e))?,
        Value::Object(_) => {
            let envelope = serde_json::from_value::<BalancesEnvelope>(value)
                .map_err(|e| ApiError::malformed(body, e))?;

            if !envelope.success {
                return Err(ApiError::request_failed(StatusCode::OK, body));
            }
            envelope
                .result
                .ok_or_else(|| ApiError::malformed(body, "missing field `result`"))?
        }
        _ => return Err(ApiError::malformed(body, "expected a list or an object")),
    };

    let balances = records
        .iter()
        .map(|record| record.to_model())
        .collect::<Result<Vec<Balance>, _>>()
        .map_err(|e| ApiError::malformed(body, e))?;

    BalanceSet::from_balances(balances).map_err(|e| ApiError::malformed(body, e))
}
