pub mod manager;
pub mod sources;

pub use manager::{SourceManager, SourceOptions};
pub use sources::{BbcNewsScraper, NewsApiClient, Source};

pub mod prelude {
    pub use super::sources::Source;
    pub use newsagg_core::{Article, Error, Result};
}
