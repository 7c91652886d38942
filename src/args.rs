use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Create an "(auto-savings transfer)" of the given amount for each withdrawal from the source
/// account to the destination account, mimicking the "round-up" savings transfer that banks
/// can set up every time your debit card is used.
#[derive(Parser, Debug)]
pub struct Args {
    /// The amount to transfer from the source account to the destination account, per withdrawal
    pub transfer_amount: Decimal,

    /// The name of the source account to transfer from
    pub source_account: String,

    /// The name of the destination account to transfer to
    pub destination_account: String,

    /// Host name or IP of the Firefly III server
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port of the Firefly III server
    #[clap(long, default_value_t = 443)]
    pub port: u16,

    /// Protocol to talk to the Firefly III server with
    #[clap(long, value_enum, default_value_t = Protocol::Https)]
    pub proto: Protocol,

    /// Location of the API token file
    #[clap(long, default_value = ".firefly_api_token")]
    pub token: PathBuf,

    /// Additional categories to ignore, e.g. "Credit Card". "Bills" is always ignored.
    #[clap(long, num_args = 1..)]
    pub ignore_categories: Vec<String>,

    /// Some banks count withdrawing cash towards the savings transfers. If Firefly is set up to
    /// "transfer" into a cash wallet, those would be missed since they aren't withdrawals.
    #[clap(long)]
    pub include_cash_transfer: bool,

    /// Name of the account you transfer to when withdrawing cash, e.g. from an ATM
    #[clap(long, default_value = "Cash wallet")]
    pub cash_account: String,

    /// Create the transfers in Firefly. Otherwise, only print what would be done.
    #[clap(long)]
    pub apply: bool,

    /// Only consider transactions on or after this date (YYYY-MM-DD)
    #[clap(long)]
    pub since_date: Option<NaiveDate>,

    /// Only consider transactions on or before this date (YYYY-MM-DD)
    #[clap(long)]
    pub until_date: Option<NaiveDate>,

    /// Ask Firefly to reject transfers that duplicate an existing transaction
    #[clap(long)]
    pub error_if_duplicate: bool,

    /// Don't run Firefly's rules on the created transfers
    #[clap(long)]
    pub no_apply_rules: bool,

    /// Currency code for the created transfers. Defaults to the source account's currency.
    #[clap(long)]
    pub currency: Option<String>,

    /// Timeout for each request to the server, in seconds
    #[clap(long, default_value_t = 30)]
    pub timeout: u64,

    /// Accept invalid TLS certificates, e.g. self-signed ones
    #[clap(long)]
    pub insecure: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
