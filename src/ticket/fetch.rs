//! Remote template download.

use super::TicketRenderError;
use std::time::Duration;

/// Request timeout for template downloads. The original flow had none; a
/// hung fetch would stall the whole send.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Download a ticket template image from a public URL.
///
/// Non-success statuses and transport errors surface as
/// [`TicketRenderError::Fetch`]; decoding is left to the render step so a
/// corrupt body fails with the right error class.
pub async fn fetch_template(url: &str) -> Result<Vec<u8>, TicketRenderError> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| TicketRenderError::Fetch(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TicketRenderError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TicketRenderError::Fetch(format!(
            "template download returned {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TicketRenderError::Fetch(e.to_string()))?;

    tracing::debug!(url = %url, size = bytes.len(), "ticket template downloaded");
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_url_is_a_fetch_error() {
        let err = fetch_template("http://127.0.0.1:1/nope.png").await.unwrap_err();
        assert!(matches!(err, TicketRenderError::Fetch(_)));
    }
}
