mod access_token;
mod client;
mod transactions;
mod transfers;

pub use access_token::AccessToken;
pub use client::{Firefly, LedgerApi};
pub use transactions::{get_all_transactions, TransactionLeg, TransactionType, TransactionsPage};
pub use transfers::{CreatedTransfer, TransferRequest};

#[cfg(test)]
pub(crate) use transactions::testutils;
