use thiserror::Error;

/// Request-level failures of the extraction pipeline.
///
/// External lookups (fetch, WHOIS, DNS) never surface here: their failures
/// are absorbed into per-scorer defaults. The only per-request hard error is
/// a schema mismatch between the assembled vector and the classifier's
/// declared feature list.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("feature schema mismatch: classifier expects {expected} features, extractor produces {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("failed to load popularity dataset: {0}")]
    Dataset(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
