use anyhow::{ensure, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::args::Args;

/// Withdrawals in these categories never trigger an auto-save transfer.
const DEFAULT_IGNORED_CATEGORIES: &[&str] = &["Bills"];

pub const AUTOSAVE_DESCRIPTION: &str = "(auto-savings transfer)";
pub const AUTOSAVE_CATEGORY: &str = "(auto-savings)";

const API_PATH: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub token_path: PathBuf,
    pub rules: QualifierRules,
    pub bounds: DateBounds,
    pub transfer: TransferPolicy,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// e.g. `https://127.0.0.1:443/api/v1`
    pub api_base_url: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

/// Decides which transaction legs trigger an auto-save transfer.
#[derive(Debug, Clone)]
pub struct QualifierRules {
    pub source_account: String,
    pub ignored_categories: HashSet<String>,
    pub include_cash_transfer: bool,
    pub cash_account: String,
}

/// Inclusive bounds on the transaction date. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.since.map_or(true, |since| date >= since)
            && self.until.map_or(true, |until| date <= until)
    }
}

#[derive(Debug, Clone)]
pub struct TransferPolicy {
    /// Fixed amount transferred per qualifying transaction
    pub amount: Decimal,
    pub source_account: String,
    pub destination_account: String,
    pub description: String,
    pub category: String,
    pub currency_code: Option<String>,
    pub error_if_duplicate: bool,
    /// Let Firefly run its rule engine on the created transfers
    pub apply_rules: bool,
    pub apply: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        ensure!(
            args.transfer_amount > Decimal::ZERO,
            "Transfer amount must be positive but is {}",
            args.transfer_amount,
        );
        ensure!(
            args.source_account != args.destination_account,
            "Source and destination account are both {:?}",
            args.source_account,
        );
        if let (Some(since), Some(until)) = (args.since_date, args.until_date) {
            ensure!(
                since <= until,
                "--since-date {since} is after --until-date {until}"
            );
        }

        let ignored_categories = DEFAULT_IGNORED_CATEGORIES
            .iter()
            .map(|category| category.to_string())
            .chain(args.ignore_categories)
            .collect();

        Ok(Self {
            server: ServerConfig {
                api_base_url: format!(
                    "{}://{}:{}{API_PATH}",
                    args.proto.scheme(),
                    args.host,
                    args.port,
                ),
                timeout: Duration::from_secs(args.timeout),
                accept_invalid_certs: args.insecure,
            },
            token_path: args.token,
            rules: QualifierRules {
                source_account: args.source_account.clone(),
                ignored_categories,
                include_cash_transfer: args.include_cash_transfer,
                cash_account: args.cash_account,
            },
            bounds: DateBounds {
                since: args.since_date,
                until: args.until_date,
            },
            transfer: TransferPolicy {
                amount: args.transfer_amount,
                source_account: args.source_account,
                destination_account: args.destination_account,
                description: AUTOSAVE_DESCRIPTION.to_string(),
                category: AUTOSAVE_CATEGORY.to_string(),
                currency_code: args.currency,
                error_if_duplicate: args.error_if_duplicate,
                apply_rules: !args.no_apply_rules,
                apply: args.apply,
            },
        })
    }
}
