use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBalance {
    #[error("currency code {0:?} is not a three-letter code")]
    CurrencyCode(String),
    #[error("{currency}: {field} amount {amount} is negative")]
    NegativeAmount {
        currency: String,
        field: &'static str,
        amount: Decimal,
    },
    #[error("{0}: available plus reserved amount does not fit a decimal")]
    TotalOverflow(String),
    #[error("currency {0} appears more than once")]
    DuplicateCurrency(String),
}

/// Funds held in a single currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    currency_code: String,
    available_amount: Decimal,
    reserved_amount: Decimal,
}

impl Balance {
    /// Validates and builds a balance. The currency code is stored upper-case.
    pub fn new(
        currency_code: &str,
        available_amount: Decimal,
        reserved_amount: Decimal,
    ) -> Result<Self, InvalidBalance> {
        if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidBalance::CurrencyCode(currency_code.to_string()));
        }
        let currency_code = currency_code.to_ascii_uppercase();

        for (field, amount) in [("available", available_amount), ("reserved", reserved_amount)] {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(InvalidBalance::NegativeAmount {
                    currency: currency_code,
                    field,
                    amount,
                });
            }
        }

        if available_amount.checked_add(reserved_amount).is_none() {
            return Err(InvalidBalance::TotalOverflow(currency_code));
        }

        Ok(Self {
            currency_code,
            available_amount,
            reserved_amount,
        })
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn available_amount(&self) -> Decimal {
        self.available_amount
    }

    pub fn reserved_amount(&self) -> Decimal {
        self.reserved_amount
    }

    /// Cannot overflow: `new` rejects pairs whose sum does not fit.
    pub fn total_amount(&self) -> Decimal {
        self.available_amount + self.reserved_amount
    }
}

/// Balances in the order the API returned them. Currency codes are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSet {
    balances: Vec<Balance>,
}

impl BalanceSet {
    pub fn from_balances(balances: Vec<Balance>) -> Result<Self, InvalidBalance> {
        let mut seen = HashSet::with_capacity(balances.len());
        for balance in &balances {
            if !seen.insert(balance.currency_code()) {
                return Err(InvalidBalance::DuplicateCurrency(
                    balance.currency_code().to_string(),
                ));
            }
        }
        Ok(Self { balances })
    }

    pub fn get(&self, currency_code: &str) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|b| b.currency_code.eq_ignore_ascii_case(currency_code))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Balance> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl<'a> IntoIterator for &'a BalanceSet {
    type Item = &'a Balance;
    type IntoIter = std::slice::Iter<'a, Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.iter()
    }
}
