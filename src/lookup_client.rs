use crate::errors::AppError;
use crate::models::CallerDetails;
use crate::redact::number_fingerprint;

/// Client for the rental-management caller lookup API.
///
/// One GET per lookup. Nothing is cached or retried; every call stands alone.
#[derive(Clone)]
pub struct CallerLookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl CallerLookupClient {
    /// Creates a new `CallerLookupClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the lookup API, e.g. `https://motorent.mv/`.
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::InternalError(format!("Failed to create lookup client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches customer and rental details for a national number.
    ///
    /// # Arguments
    ///
    /// * `caller` - The normalized (national) number.
    ///
    /// # Returns
    ///
    /// * `Result<CallerDetails, AppError>` - The decoded body, `NetworkError` when the
    ///   API cannot be reached or answers with an error status, `ParseError` when the
    ///   body does not decode.
    pub async fn fetch_caller_details(&self, caller: &str) -> Result<CallerDetails, AppError> {
        // Build URL with proper parameter encoding
        let url = reqwest::Url::parse_with_params(
            &format!("{}/get_caller", self.base_url.trim_end_matches('/')),
            &[("caller", caller)],
        )
        .map_err(|e| AppError::InternalError(format!("Failed to build lookup URL: {}", e)))?;

        let fingerprint = number_fingerprint(caller);
        tracing::info!("Fetching caller details for {}", fingerprint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Lookup request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Lookup API returned error {}: {}", status, error_text);
            return Err(AppError::NetworkError(format!(
                "Lookup API returned {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read lookup response: {}", e)))?;

        let details: CallerDetails = serde_json::from_str(&body).map_err(|e| {
            AppError::ParseError(format!("Failed to parse lookup response: {}", e))
        })?;

        tracing::info!(
            "✓ Caller details for {}: customer={}, rental={}",
            fingerprint,
            details.customer.is_some(),
            details.rental.is_some()
        );
        Ok(details)
    }
}
