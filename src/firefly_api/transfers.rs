use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TransferPolicy;

/// Body of `POST /api/v1/transactions` creating a single transfer
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub error_if_duplicate_hash: bool,
    pub apply_rules: bool,
    pub transactions: Vec<TransferSplit>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransferSplit {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub date: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub description: String,
    pub category_name: String,
    pub source_name: String,
    pub destination_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

impl TransferRequest {
    pub fn new(policy: &TransferPolicy, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            error_if_duplicate_hash: policy.error_if_duplicate,
            apply_rules: policy.apply_rules,
            transactions: vec![TransferSplit {
                type_: "transfer",
                date: date.format("%Y-%m-%dT00:00:00").to_string(),
                amount,
                description: policy.description.clone(),
                category_name: policy.category.clone(),
                source_name: policy.source_account.clone(),
                destination_name: policy.destination_account.clone(),
                currency_code: policy.currency_code.clone(),
            }],
        }
    }

    #[cfg(test)]
    pub fn date(&self) -> Option<&str> {
        self.transactions.first().map(|split| split.date.as_str())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedTransfer {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub(super) struct CreatedTransferResponse {
    pub data: CreatedTransfer,
}
