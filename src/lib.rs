pub mod config;
pub mod context;
pub mod dns;
pub mod error;
pub mod features;
pub mod fetcher;
pub mod popularity;
pub mod url_parts;
pub mod whois;

pub use config::Config;
pub use context::{Extractor, UrlContext};
pub use error::FeatureError;
pub use features::{FeatureVector, Score, FEATURE_NAMES};
pub use popularity::PopularityIndex;
pub use url_parts::UrlTarget;
