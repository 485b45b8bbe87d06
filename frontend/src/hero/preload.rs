use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use log::{error, info};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Url};
use yew::Reducible;

use crate::hero::pool::{HandlePool, Revoke};

#[derive(Debug, Error, PartialEq)]
pub enum PreloadError {
    #[error("request failed: {0}")]
    FetchError(String),
    #[error("server responded with status {0}")]
    StatusError(u16),
    #[error("could not read response body: {0}")]
    BlobError(String),
    #[error("could not create object url: {0}")]
    ObjectUrlError(String),
}

/// Turns a source locator into a locally playable handle.
#[allow(async_fn_in_trait)]
pub trait FetchVideo {
    async fn fetch_object_url(&self, src: &str) -> Result<String, PreloadError>;
}

pub struct BrowserFetcher;

impl FetchVideo for BrowserFetcher {
    async fn fetch_object_url(&self, src: &str) -> Result<String, PreloadError> {
        let response = Request::get(src)
            .send()
            .await
            .map_err(|e| PreloadError::FetchError(e.to_string()))?;
        if !response.ok() {
            return Err(PreloadError::StatusError(response.status()));
        }

        let promise = response
            .as_raw()
            .blob()
            .map_err(|e| PreloadError::BlobError(format!("{:?}", e)))?;
        let blob: Blob = JsFuture::from(promise)
            .await
            .map_err(|e| PreloadError::BlobError(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|e| PreloadError::BlobError(format!("{:?}", e)))?;

        Url::create_object_url_with_blob(&blob).map_err(|e| PreloadError::ObjectUrlError(format!("{:?}", e)))
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct PreloadReport {
    pub loaded: usize,
    pub failed: Vec<usize>,
}

/// Loads clips 1..=total one after another into `pool`, calling `on_loaded`
/// after each successful insert. A failed index is logged and skipped. The
/// pass stops early once the pool has been released.
pub async fn preload_videos<F, R>(
    total: usize,
    src_for: impl Fn(usize) -> String,
    fetcher: &F,
    pool: &RefCell<HandlePool<R>>,
    mut on_loaded: impl FnMut(usize),
) -> PreloadReport
where
    F: FetchVideo,
    R: Revoke,
{
    let mut report = PreloadReport::default();
    for index in 1..=total {
        if pool.borrow().is_closed() {
            info!("Video pool released, stopping preload at {}", index);
            break;
        }
        let src = src_for(index);
        match fetcher.fetch_object_url(&src).await {
            Ok(url) => {
                if !pool.borrow_mut().insert(index, url) {
                    break;
                }
                report.loaded += 1;
                on_loaded(index);
            }
            Err(e) => {
                error!("Failed to load video {}: {}", index, e);
                report.failed.push(index);
            }
        }
    }
    report
}

/// Loaded-count for the preload pass. Never exceeds `total` and never decreases.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

pub enum LoadAction {
    Loaded,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self { loaded: 0, total }
    }

    pub fn is_loading(&self) -> bool {
        self.loaded < self.total
    }
}

impl Reducible for LoadProgress {
    type Action = LoadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            LoadAction::Loaded => Rc::new(LoadProgress {
                loaded: (self.loaded + 1).min(self.total),
                total: self.total,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::pool::tests::RecordingRevoker;
    use futures::executor::block_on;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeFetcher {
        failing: HashSet<String>,
        requested: RefCell<Vec<String>>,
    }

    impl FetchVideo for FakeFetcher {
        async fn fetch_object_url(&self, src: &str) -> Result<String, PreloadError> {
            self.requested.borrow_mut().push(src.to_string());
            if self.failing.contains(src) {
                return Err(PreloadError::StatusError(404));
            }
            Ok(format!("blob:{}", src))
        }
    }

    fn src(index: usize) -> String {
        format!("/videos/hero-{}.mp4", index)
    }

    fn run(total: usize, fetcher: &FakeFetcher) -> (RefCell<HandlePool<RecordingRevoker>>, LoadProgress, PreloadReport) {
        let pool = RefCell::new(HandlePool::with_revoker(RecordingRevoker::default()));
        let mut progress = Rc::new(LoadProgress::new(total));
        let report = block_on(preload_videos(total, src, fetcher, &pool, |_| {
            progress = progress.clone().reduce(LoadAction::Loaded);
        }));
        let progress = (*progress).clone();
        (pool, progress, report)
    }

    #[test]
    fn full_pass_fills_every_index() {
        for total in 1..=6 {
            let fetcher = FakeFetcher::default();
            let (pool, progress, report) = run(total, &fetcher);
            assert_eq!(pool.borrow().indices(), (1..=total).collect::<Vec<_>>());
            assert_eq!(progress.loaded, total);
            assert!(!progress.is_loading());
            assert_eq!(report.loaded, total);
            assert!(report.failed.is_empty());
        }
    }

    #[test]
    fn fetches_run_in_index_order() {
        let fetcher = FakeFetcher::default();
        run(4, &fetcher);
        assert_eq!(*fetcher.requested.borrow(), (1..=4).map(src).collect::<Vec<_>>());
    }

    #[test]
    fn failed_index_is_skipped_and_loading_never_clears() {
        let fetcher = FakeFetcher {
            failing: HashSet::from([src(3)]),
            ..Default::default()
        };
        let (pool, progress, report) = run(4, &fetcher);
        assert_eq!(pool.borrow().indices(), vec![1, 2, 4]);
        assert_eq!(pool.borrow().get(3), None);
        assert_eq!(progress.loaded, 3);
        assert!(progress.is_loading());
        assert_eq!(report.failed, vec![3]);
    }

    #[test]
    fn released_pool_stops_the_pass() {
        let fetcher = FakeFetcher::default();
        let revoker = RecordingRevoker::default();
        let pool = RefCell::new(HandlePool::with_revoker(revoker.clone()));
        pool.borrow_mut().release_all();

        let report = block_on(preload_videos(4, src, &fetcher, &pool, |_| {}));
        assert_eq!(report.loaded, 0);
        assert!(fetcher.requested.borrow().is_empty());
        assert!(revoker.revoked.borrow().is_empty());
    }

    #[test]
    fn progress_saturates_at_total() {
        let mut progress = Rc::new(LoadProgress::new(2));
        for _ in 0..5 {
            progress = progress.reduce(LoadAction::Loaded);
        }
        assert_eq!(progress.loaded, 2);
        assert!(!progress.is_loading());
    }
}
