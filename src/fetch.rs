//! Upstream calendar and config fetching.

use futures::StreamExt;
use reqwest::Client;

use icsift_core::{EventFilter, FilterConfig, LabelField, LineBuffer, Sieve};

use crate::routes::ApiError;

/// Fetch the calendar feed at `url` and run it through the filter,
/// returning the filtered document.
///
/// The body is split into lines as chunks arrive, so only the current
/// event block and the retained output are ever buffered. If the stream
/// fails mid-read the whole request fails; nothing already buffered is
/// returned.
pub async fn filtered_calendar(
    client: &Client,
    url: &str,
    sieve: &Sieve,
    field: LabelField,
) -> Result<Vec<u8>, ApiError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| ApiError::UpstreamFetch {
            url: url.to_string(),
            source,
        })?;

    let mut lines = LineBuffer::new();
    let mut filter = EventFilter::new(sieve, field);

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|source| ApiError::UpstreamRead {
            url: url.to_string(),
            source,
        })?;

        lines.extend(&chunk);
        while let Some(line) = lines.next_line() {
            filter.push(&line);
        }
    }
    if let Some(fragment) = lines.take_remainder() {
        filter.push(&fragment);
    }

    Ok(filter.finish())
}

/// Fetch and parse a remote JSON filter config.
pub async fn filter_config(client: &Client, url: &str) -> Result<FilterConfig, ApiError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| ApiError::ConfigFetch {
            url: url.to_string(),
            source,
        })?;

    let bytes = response.bytes().await.map_err(|source| ApiError::ConfigFetch {
        url: url.to_string(),
        source,
    })?;

    FilterConfig::from_json(&bytes).map_err(|source| ApiError::ConfigInvalid {
        url: url.to_string(),
        source,
    })
}
