use rust_decimal::Decimal;

use crate::config::QualifierRules;
use crate::firefly_api::{TransactionLeg, TransactionType};

/// A transaction leg that triggers an auto-save transfer
#[derive(Debug, Clone, PartialEq)]
pub struct QualifyingEntry {
    pub currency_code: String,
    pub amount: Decimal,
    pub description: String,
    pub date: String,
}

impl From<&TransactionLeg> for QualifyingEntry {
    fn from(leg: &TransactionLeg) -> Self {
        Self {
            currency_code: leg.currency_code.clone(),
            amount: leg.amount,
            description: leg.description.clone(),
            date: leg.date.clone(),
        }
    }
}

/// Returns the legs leaving the source account that should trigger an auto-save transfer,
/// in the order they were given.
pub fn qualifying_entries<'a>(
    rules: &QualifierRules,
    legs: impl IntoIterator<Item = &'a TransactionLeg>,
) -> Vec<QualifyingEntry> {
    legs.into_iter()
        .filter(|leg| qualifies(rules, leg))
        .map(QualifyingEntry::from)
        .collect()
}

fn qualifies(rules: &QualifierRules, leg: &TransactionLeg) -> bool {
    if leg.source_name.as_deref() != Some(rules.source_account.as_str()) {
        return false;
    }
    if let Some(category) = &leg.category_name {
        if rules.ignored_categories.contains(category) {
            return false;
        }
    }
    match leg.type_ {
        TransactionType::Withdrawal => true,
        // Withdrawing cash from an ATM shows up as a transfer into the cash wallet
        TransactionType::Transfer => {
            rules.include_cash_transfer
                && leg.destination_name.as_deref() == Some(rules.cash_account.as_str())
        }
        TransactionType::Deposit | TransactionType::Other => false,
    }
}
