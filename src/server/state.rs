use crate::cache::DatasetCache;
use crate::fetcher::HttpImageFetcher;

pub struct AppState {
    pub cache: DatasetCache,
    pub fetcher: HttpImageFetcher,
}

impl AppState {
    pub fn new(cache: DatasetCache, fetcher: HttpImageFetcher) -> Self {
        Self { cache, fetcher }
    }
}
