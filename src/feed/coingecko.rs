//! CoinGecko simple-price client (primary provider)
//!
//! Queries `/simple/price` with 24h change and market cap included. The
//! payload is keyed by coin id, then by currency-derived field names:
//! `{"mori-coin": {"usd": 0.17, "usd_24h_change": 4.2, "usd_market_cap": 170000}}`.

use super::types::{decimal_from_json, positive_price};
use super::{FeedError, PriceProvider, Quote};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

const PROVIDER: &str = "coingecko";

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// CoinGecko coin identifier
    pub coin_id: String,
    /// Reference currency
    pub vs_currency: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            coin_id: "mori-coin".to_string(),
            vs_currency: "usd".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for CoinGecko's simple-price endpoint
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a client with the given configuration
    pub fn with_config(config: CoinGeckoConfig) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Extract a quote from a simple-price payload
    fn parse_payload(&self, body: &serde_json::Value) -> Result<Quote, FeedError> {
        let entry = body
            .get(&self.config.coin_id)
            .filter(|v| v.is_object())
            .ok_or(FeedError::MissingField {
                provider: PROVIDER,
                field: "coin entry",
            })?;

        let currency = self.config.vs_currency.as_str();
        let raw_price = entry.get(currency).ok_or(FeedError::MissingField {
            provider: PROVIDER,
            field: "price",
        })?;
        let price = positive_price(PROVIDER, raw_price)?;

        let change_24h = entry
            .get(format!("{currency}_24h_change"))
            .and_then(decimal_from_json)
            .unwrap_or(Decimal::ZERO);

        let market_cap = entry
            .get(format!("{currency}_market_cap"))
            .and_then(decimal_from_json);

        Ok(Quote {
            price,
            change_24h,
            market_cap,
        })
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_quote(&self) -> Result<Quote, FeedError> {
        let url = format!("{}/simple/price", self.config.base_url);

        tracing::debug!(url = %url, coin = %self.config.coin_id, "Fetching CoinGecko price");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.config.coin_id.as_str()),
                ("vs_currencies", self.config.vs_currency.as_str()),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        self.parse_payload(&body)
    }
}
