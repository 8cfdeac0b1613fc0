//! Page registry loading: remote overrides merged over the built-in default floor.

use std::collections::HashSet;

use futures::future::{select, Either};
use leptos::logging;
use nav_host::{sleep, DocumentCollection, Scheduler};
use serde_json::Value;
use thiserror::Error;

use crate::{config::NavConfig, model::Page};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Remote page load failures. All of them are recovered by falling back to defaults.
pub enum RegistryError {
    /// The collection could not be listed.
    #[error("page collection fetch failed: {0}")]
    Fetch(String),
    /// The collection did not answer within the configured timeout.
    #[error("page collection fetch timed out after {0} ms")]
    TimedOut(u32),
}

/// Merges remote pages over `defaults`.
///
/// Remote entries come first (later duplicates of a title are dropped), then every default whose
/// title the remote set lacks. The result is stable-sorted by [`Page::sort_order`], so ties keep
/// remote-before-default order.
pub fn merge_pages(remote: Vec<Page>, defaults: &[Page]) -> Vec<Page> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Page> = remote
        .into_iter()
        .filter(|page| seen.insert(page.title.clone()))
        .collect();
    merged.extend(
        defaults
            .iter()
            .filter(|page| !seen.contains(&page.title))
            .cloned(),
    );
    merged.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
    merged
}

fn decode_pages(documents: Vec<Value>) -> Vec<Page> {
    documents
        .into_iter()
        .filter_map(|document| match serde_json::from_value::<Page>(document) {
            Ok(page) => Some(page),
            Err(err) => {
                logging::warn!("navbar page record skipped: {err}");
                None
            }
        })
        .collect()
}

/// Fetches remote pages, bounded by `config.load_timeout_ms`.
///
/// # Errors
///
/// Returns [`RegistryError`] when the collection fails or times out.
pub async fn fetch_remote_pages(
    documents: &dyn DocumentCollection,
    scheduler: &dyn Scheduler,
    config: &NavConfig,
) -> Result<Vec<Page>, RegistryError> {
    let timeout = sleep(scheduler, config.load_timeout_ms);
    let timer = timeout.id();
    let fetch = documents.list_documents(&config.collection_path);
    match select(fetch, timeout).await {
        Either::Left((result, _)) => {
            scheduler.cancel(timer);
            result.map(decode_pages).map_err(RegistryError::Fetch)
        }
        Either::Right(_) => Err(RegistryError::TimedOut(config.load_timeout_ms)),
    }
}

/// Loads the page set for one auth transition. Never fails: any remote failure yields the
/// default list.
pub async fn load_pages(
    documents: &dyn DocumentCollection,
    scheduler: &dyn Scheduler,
    config: &NavConfig,
) -> Vec<Page> {
    let remote = match fetch_remote_pages(documents, scheduler, config).await {
        Ok(pages) => pages,
        Err(err) => {
            logging::warn!("navbar page load failed, using defaults: {err}");
            Vec::new()
        }
    };
    merge_pages(remote, &config.default_pages)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{future::Future, pin::Pin};

    use futures::{executor::block_on, task::LocalSpawnExt};
    use nav_host::{DocumentFuture, MemoryDocumentCollection, VirtualScheduler};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::nav_config;

    pub(crate) fn page(title: &str, url: &str, public: bool, admin: bool) -> Page {
        Page {
            title: title.to_string(),
            url: url.to_string(),
            icon: format!("fa-{}", title.to_lowercase()),
            is_public: public,
            is_admin: admin,
            order: None,
        }
    }

    fn titles(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|page| page.title.as_str()).collect()
    }

    #[test]
    fn remote_home_overrides_default_and_defaults_fill_the_rest() {
        let remote = vec![Page {
            order: Some(1.0),
            icon: "fa-home".to_string(),
            ..page("Home", "index.html", true, false)
        }];
        let defaults = vec![
            page("Home", "home-default.html", true, false),
            page("Settings", "settings.html", false, false),
            page("Admin Panel", "admin.html", false, true),
        ];

        let merged = merge_pages(remote, &defaults);

        assert_eq!(titles(&merged), vec!["Home", "Settings", "Admin Panel"]);
        assert_eq!(merged[0].url, "index.html");
        assert_eq!(
            merged.iter().map(Page::sort_order).collect::<Vec<_>>(),
            vec![1.0, 99.0, 99.0]
        );
    }

    #[test]
    fn merge_never_repeats_a_title() {
        let remote = vec![
            page("Home", "a.html", true, false),
            page("Home", "b.html", true, false),
            page("Games", "games.html", true, false),
        ];
        let defaults = vec![
            page("Games", "games-default.html", true, false),
            page("Settings", "settings.html", false, false),
        ];

        let merged = merge_pages(remote, &defaults);
        let mut unique = titles(&merged);
        unique.sort();
        unique.dedup();

        assert_eq!(unique.len(), merged.len());
        assert_eq!(merged[0].url, "a.html");
    }

    #[test]
    fn equal_order_keeps_remote_before_defaults() {
        let remote = vec![
            Page {
                order: Some(5.0),
                ..page("Zeta", "z.html", true, false)
            },
            page("Remote", "r.html", true, false),
        ];
        let defaults = vec![
            Page {
                order: Some(5.0),
                ..page("Alpha", "a.html", true, false)
            },
            page("Default", "d.html", true, false),
            Page {
                order: Some(2.0),
                ..page("First", "f.html", true, false)
            },
        ];

        let merged = merge_pages(remote, &defaults);

        assert_eq!(
            titles(&merged),
            vec!["First", "Zeta", "Alpha", "Remote", "Default"]
        );
    }

    #[test]
    fn empty_remote_yields_defaults() {
        let defaults = vec![page("Home", "index.html", true, false)];
        assert_eq!(merge_pages(Vec::new(), &defaults), defaults);
    }

    #[test]
    fn load_falls_back_to_defaults_on_fetch_failure() {
        let config = nav_config();
        let documents = MemoryDocumentCollection::default();
        documents.set_failure(Some("permission denied".to_string()));
        let scheduler = VirtualScheduler::default();

        let pages = block_on(load_pages(&documents, &scheduler, config));

        assert_eq!(pages, merge_pages(Vec::new(), &config.default_pages));
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn load_skips_malformed_records_and_merges_valid_ones() {
        let config = nav_config();
        let documents = MemoryDocumentCollection::default();
        documents.put(
            config.collection_path.clone(),
            vec![
                json!({"title": "Home", "url": "index.html", "icon": "fa-house", "isPublic": true, "order": 1}),
                json!({"url": "missing-title.html"}),
            ],
        );
        let scheduler = VirtualScheduler::default();

        let pages = block_on(load_pages(&documents, &scheduler, config));

        assert_eq!(pages[0].title, "Home");
        assert_eq!(pages[0].icon, "fa-house");
        assert_eq!(pages.len(), config.default_pages.len());
    }

    #[test]
    fn fractional_remote_order_sorts_between_integer_orders() {
        let config = nav_config();
        let documents = MemoryDocumentCollection::default();
        documents.put(
            config.collection_path.clone(),
            vec![
                json!({"title": "Games", "url": "games.html", "icon": "fa-gamepad", "isPublic": true, "order": 2}),
                json!({"title": "Arcade", "url": "arcade.html", "icon": "fa-ghost", "isPublic": true, "order": 1.5}),
                json!({"title": "Home", "url": "index.html", "icon": "fa-house", "isPublic": true, "order": 1}),
            ],
        );
        let scheduler = VirtualScheduler::default();

        let pages = block_on(load_pages(&documents, &scheduler, config));

        assert_eq!(titles(&pages[..3]), vec!["Home", "Arcade", "Games"]);
        assert_eq!(pages[1].sort_order(), 1.5);
        assert_eq!(pages[2].url, "games.html");
    }

    struct HangingCollection;

    impl DocumentCollection for HangingCollection {
        fn list_documents<'a>(
            &'a self,
            _path: &'a str,
        ) -> DocumentFuture<'a, Result<Vec<Value>, String>> {
            let pending: Pin<Box<dyn Future<Output = Result<Vec<Value>, String>>>> =
                Box::pin(futures::future::pending());
            pending
        }
    }

    #[test]
    fn load_times_out_to_defaults() {
        let config = nav_config();
        let scheduler = VirtualScheduler::default();
        let mut pool = futures::executor::LocalPool::new();
        let result = std::rc::Rc::new(std::cell::RefCell::new(None));

        let sink = result.clone();
        let task_scheduler = scheduler.clone();
        pool.spawner()
            .spawn_local(async move {
                let collection = HangingCollection;
                let outcome = fetch_remote_pages(&collection, &task_scheduler, config).await;
                *sink.borrow_mut() = Some(outcome);
            })
            .expect("spawn");

        pool.run_until_stalled();
        assert!(result.borrow().is_none());

        scheduler.advance(u64::from(config.load_timeout_ms));
        pool.run_until_stalled();

        assert_eq!(
            result.borrow().clone(),
            Some(Err(RegistryError::TimedOut(config.load_timeout_ms)))
        );
    }
}
