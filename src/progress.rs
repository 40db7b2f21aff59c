//! Progress display for image fetches (CLI)

use farm_dashboard_common::{ImageFetcher, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;

/// Wraps a fetcher and advances a progress bar after each fetch
pub struct ProgressFetcher<'a, F> {
    inner: &'a F,
    bar: ProgressBar,
}

impl<'a, F: ImageFetcher + Sync> ProgressFetcher<'a, F> {
    pub fn new(inner: &'a F, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("fetching images");
        Self { inner, bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<F: ImageFetcher + Sync> ImageFetcher for ProgressFetcher<'_, F> {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let inner = self.inner.fetch(url);
        let bar = self.bar.clone();
        async move {
            let result = inner.await;
            bar.inc(1);
            result
        }
    }
}
