use async_stream::try_stream;
use futures::stream::BoxStream;
use serde::Deserialize;
use tracing::debug;

use crate::corpus::SegmentRecord;
use crate::error::CorpusError;
use crate::utils::config::AppConfig;

/// Page size for the datasets-server rows endpoint (its documented maximum).
const PAGE_LENGTH: usize = 100;

/// Defines the behavior of the remote corpus provider.
///
/// The provider is an opaque collaborator queried by split name; its own
/// paging and retry internals are out of scope here. A single fetch
/// attempt either completes or fails.
#[cfg_attr(test, mockall::automock)]
pub trait CorpusSource: Send + Sync {
    /// Lazily streams every segment record of the named corpus split.
    fn stream_split(&self, split: &str)
        -> BoxStream<'static, Result<SegmentRecord, CorpusError>>;
}

/// Streams TEDLIUM3 rows from the Hugging Face datasets-server.
pub struct HfRowsSource {
    client: reqwest::Client,
    endpoint: String,
    dataset: String,
    release: String,
}

impl HfRowsSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.rows_endpoint.clone(),
            dataset: config.dataset.clone(),
            release: config.release.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
}

#[derive(Deserialize)]
struct RowEntry {
    row: serde_json::Value,
}

impl CorpusSource for HfRowsSource {
    fn stream_split(
        &self,
        split: &str,
    ) -> BoxStream<'static, Result<SegmentRecord, CorpusError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let dataset = self.dataset.clone();
        let release = self.release.clone();
        let split = split.to_owned();

        Box::pin(try_stream! {
            let mut offset = 0usize;
            loop {
                debug!(dataset = %dataset, split = %split, offset, "Fetching dataset rows page");
                let query = [
                    ("dataset", dataset.clone()),
                    ("config", release.clone()),
                    ("split", split.clone()),
                    ("offset", offset.to_string()),
                    ("length", PAGE_LENGTH.to_string()),
                ];
                let page: RowsPage = client
                    .get(&endpoint)
                    .query(&query)
                    .send()
                    .await
                    .map_err(into_source_error)?
                    .error_for_status()
                    .map_err(into_source_error)?
                    .json()
                    .await
                    .map_err(into_source_error)?;

                let fetched = page.rows.len();
                for entry in page.rows {
                    yield into_record(&client, entry.row).await?;
                }
                if fetched < PAGE_LENGTH {
                    break;
                }
                offset += fetched;
            }
        })
    }
}

/// Turns one dataset row into a `SegmentRecord`, resolving the audio cell
/// to its raw bytes. Fields other than `id` and `audio` pass through as
/// opaque metadata.
async fn into_record(
    client: &reqwest::Client,
    mut row: serde_json::Value,
) -> Result<SegmentRecord, CorpusError> {
    let fields = row.as_object_mut().ok_or_else(|| {
        CorpusError::DataSource("dataset row is not a JSON object".to_string())
    })?;

    let id = match fields.remove("id") {
        Some(serde_json::Value::String(id)) => id,
        _ => {
            return Err(CorpusError::DataSource(
                "dataset row is missing a string 'id' field".to_string(),
            ))
        }
    };
    let audio = match fields.remove("audio") {
        Some(cell) => fetch_audio_bytes(client, &cell).await?,
        None => Vec::new(),
    };

    Ok(SegmentRecord {
        id,
        audio,
        metadata: row,
    })
}

/// The rows endpoint renders audio cells as `[{"src": url, "type": ...}]`.
/// Cells without a source URL yield an empty payload.
async fn fetch_audio_bytes(
    client: &reqwest::Client,
    cell: &serde_json::Value,
) -> Result<Vec<u8>, CorpusError> {
    let src = cell
        .get(0)
        .and_then(|entry| entry.get("src"))
        .and_then(|src| src.as_str());
    let Some(url) = src else {
        return Ok(Vec::new());
    };

    let bytes = client
        .get(url)
        .send()
        .await
        .map_err(into_source_error)?
        .error_for_status()
        .map_err(into_source_error)?
        .bytes()
        .await
        .map_err(into_source_error)?;

    Ok(bytes.to_vec())
}

fn into_source_error(e: reqwest::Error) -> CorpusError {
    CorpusError::DataSource(e.to_string())
}
