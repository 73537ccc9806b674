//! Primary/secondary fallback price source

use super::{FeedError, PriceObservation, PriceProvider, PriceSource};
use async_trait::async_trait;
use std::time::Instant;

/// Queries the primary provider and falls back to the secondary one
/// when the primary fails or returns no usable price.
pub struct FallbackSource {
    primary: Box<dyn PriceProvider>,
    secondary: Box<dyn PriceProvider>,
}

impl FallbackSource {
    /// Create a fallback source from two providers
    pub fn new(primary: Box<dyn PriceProvider>, secondary: Box<dyn PriceProvider>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl PriceSource for FallbackSource {
    async fn fetch(&self) -> Result<PriceObservation, FeedError> {
        let started = Instant::now();

        let primary_err = match self.primary.fetch_quote().await {
            Ok(quote) => {
                crate::telemetry::record_fetch(self.primary.name(), started.elapsed(), true);
                return Ok(PriceObservation::from_quote(quote, self.primary.name()));
            }
            Err(e) => {
                crate::telemetry::record_fetch(self.primary.name(), started.elapsed(), false);
                tracing::warn!(
                    provider = self.primary.name(),
                    error = %e,
                    "Primary price provider failed, trying secondary"
                );
                e
            }
        };

        let started = Instant::now();
        match self.secondary.fetch_quote().await {
            Ok(quote) => {
                crate::telemetry::record_fetch(self.secondary.name(), started.elapsed(), true);
                Ok(PriceObservation::from_quote(quote, self.secondary.name()))
            }
            Err(secondary_err) => {
                crate::telemetry::record_fetch(self.secondary.name(), started.elapsed(), false);
                Err(FeedError::SourceUnavailable {
                    primary: Box::new(primary_err),
                    secondary: Box::new(secondary_err),
                })
            }
        }
    }
}
