pub mod balance;

pub use balance::{Balance, BalanceSet, InvalidBalance};
