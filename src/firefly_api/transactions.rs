use anyhow::{ensure, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::LedgerApi;
use crate::config::DateBounds;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[serde(alias = "withdrawals")]
    Withdrawal,
    Deposit,
    Transfer,
    #[serde(other)]
    Other,
}

/// One split of a Firefly transaction group
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct TransactionLeg {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub source_name: Option<String>,
    pub destination_name: Option<String>,
    pub category_name: Option<String>,
    pub currency_code: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 timestamp, e.g. `2023-03-10T00:00:00-05:00`
    pub date: String,
}

#[derive(Deserialize, Debug)]
pub struct TransactionsPage {
    pub data: Vec<TransactionGroup>,
    pub meta: Meta,
}

#[derive(Deserialize, Debug)]
pub struct TransactionGroup {
    pub attributes: TransactionGroupAttributes,
}

#[derive(Deserialize, Debug)]
pub struct TransactionGroupAttributes {
    pub transactions: Vec<TransactionLeg>,
}

#[derive(Deserialize, Debug)]
pub struct Meta {
    pub pagination: Pagination,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

/// Fetches every page of transactions and returns the legs of all transaction groups in the
/// order the server returned them. `on_page` is called with `(current_page, total_pages)` after
/// each page.
pub async fn get_all_transactions(
    api: &impl LedgerApi,
    bounds: &DateBounds,
    mut on_page: impl FnMut(u32, u32),
) -> Result<Vec<TransactionLeg>> {
    log::info!("Requesting transactions...");
    log::info!("Requesting transactions...page 1...");

    let mut result = Vec::new();

    let page = api.transactions_page(1, bounds).await?;
    let total_pages = page.meta.pagination.total_pages;
    let mut pagination = add_page(&mut result, page, 1)?;
    on_page(pagination.current_page, total_pages);

    // The page count reported on the first page bounds the loop even if the ledger grows while
    // we're paging through it.
    while pagination.current_page < total_pages {
        let pagenum = pagination.current_page + 1;
        log::info!("Requesting transactions...page {pagenum}/{total_pages}...");
        let page = api.transactions_page(pagenum, bounds).await?;
        pagination = add_page(&mut result, page, pagenum)?;
        on_page(pagination.current_page, total_pages);
    }

    log::info!("Requesting transactions...done ({} legs)", result.len());

    Ok(result)
}

fn add_page(
    result: &mut Vec<TransactionLeg>,
    page: TransactionsPage,
    expected_page: u32,
) -> Result<Pagination> {
    let pagination = page.meta.pagination;
    ensure!(
        pagination.current_page == expected_page,
        "Requested page {expected_page} but server returned page {}",
        pagination.current_page,
    );
    result.extend(
        page.data
            .into_iter()
            .flat_map(|group| group.attributes.transactions),
    );
    Ok(pagination)
}
