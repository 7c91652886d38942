use anyhow::{anyhow, bail, Context as _, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Request, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::transfers::CreatedTransferResponse;
use super::{AccessToken, CreatedTransfer, TransactionsPage, TransferRequest};
use crate::config::{DateBounds, ServerConfig};

const ACCEPT: &str = "application/vnd.api+json";
const TRANSACTIONS_PATH: &str = "/transactions";

/// The two ledger operations this tool needs. Implemented by [Firefly] for the real server.
#[allow(async_fn_in_trait)]
pub trait LedgerApi {
    async fn transactions_page(&self, page: u32, bounds: &DateBounds) -> Result<TransactionsPage>;

    async fn create_transfer(&self, request: &TransferRequest) -> Result<CreatedTransfer>;
}

pub struct Firefly {
    client: Client,
    transactions_url: String,
}

impl Firefly {
    pub fn new(config: &ServerConfig, access_token: &AccessToken) -> Result<Firefly> {
        let client = Client::builder()
            .default_headers(default_headers(access_token)?)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("Failed to set up HTTP client")?;
        Ok(Firefly {
            client,
            transactions_url: format!("{}{TRANSACTIONS_PATH}", config.api_base_url),
        })
    }

    fn transactions_request(&self, page: u32, bounds: &DateBounds) -> Result<Request> {
        self.client
            .get(&self.transactions_url)
            .query(&transactions_query(page, bounds))
            .build()
            .with_context(|| format!("Failed to build request for transactions page {page}"))
    }

    fn transfer_request(&self, request: &TransferRequest) -> Result<Request> {
        self.client
            .post(&self.transactions_url)
            .json(request)
            .build()
            .context("Failed to build transfer request")
    }
}

impl LedgerApi for Firefly {
    async fn transactions_page(&self, page: u32, bounds: &DateBounds) -> Result<TransactionsPage> {
        let request = self.transactions_request(page, bounds)?;
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("Failed to request transactions page {page}"))?;
        read_response(response)
            .await
            .with_context(|| format!("Failed to load transactions page {page}"))
    }

    async fn create_transfer(&self, request: &TransferRequest) -> Result<CreatedTransfer> {
        let request = self.transfer_request(request)?;
        let response = self
            .client
            .execute(request)
            .await
            .context("Failed to submit transfer")?;
        let response: CreatedTransferResponse = read_response(response).await?;
        Ok(response.data)
    }
}

/// Sent with every request
fn default_headers(access_token: &AccessToken) -> Result<HeaderMap> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", access_token.get()))
        .context("API token contains characters that aren't allowed in a header")?;
    authorization.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::AUTHORIZATION, authorization);
    Ok(headers)
}

fn transactions_query(page: u32, bounds: &DateBounds) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string())];
    if let Some(since) = bounds.since {
        query.push(("start", since.format("%Y-%m-%d").to_string()));
    }
    if let Some(until) = bounds.until {
        query.push(("end", until.format("%Y-%m-%d").to_string()));
    }
    query
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;
    parse_body(status, &body)
}

fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        bail!("Server responded with {status}: {body}");
    }
    serde_json::from_str(body).map_err(|err| anyhow!("Unexpected response ({err}): {body}"))
}
