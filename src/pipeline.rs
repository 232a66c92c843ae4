use crate::extract::{self, DocumentSource, ExtractionError};
use crate::models::ContentSnapshot;
use crate::snapshot::{SnapshotError, SnapshotSink};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Fetch, extract and write one snapshot.
///
/// The sink is only reached once the whole document has been fetched and
/// extracted, so any earlier failure leaves the previous snapshot untouched.
pub async fn run_pipeline<S, K>(
    source: &S,
    sink: &K,
    url: &str,
) -> Result<ContentSnapshot, PipelineError>
where
    S: DocumentSource,
    K: SnapshotSink,
{
    let url = extract::validate_url(url)?;
    let html = source.fetch_document(&url).await?;
    let snapshot = extract::extract_snapshot(&html);
    tracing::debug!(
        headings = snapshot.headings.len(),
        paragraphs = snapshot.paragraphs.len(),
        images = snapshot.images.len(),
        "content extracted"
    );
    sink.write(&snapshot).await?;
    Ok(snapshot)
}
