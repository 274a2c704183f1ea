//! Results query derived from the shared configuration.
//!
//! The results service answers `GET {backend}/results/` with the query
//! parameters `label`, `maxAgeMin`, `offset` and `limit`. [`ResultsQuery`]
//! renders that URL from the store; it never sends a request.

use std::{cell::RefCell, fmt, rc::Rc};
use url::{Url, form_urlencoded};

use crate::{cell::Subscription, store::SharedConfigStore};

/// Largest page the results service hands out.
pub const MAX_LIMIT: u32 = 100;

/// Path of the results collection on the backend.
pub const RESULTS_PATH: &str = "/results/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsQuery {
    /// Backend base URL with trailing slashes removed
    pub backend_url: String,
    /// Only return results updated within this many minutes
    pub max_age_min: i64,
    /// Restrict to a single result label
    pub label: Option<String>,
    pub offset: u32,
    /// Page size, clamped to [`MAX_LIMIT`]
    pub limit: u32,
}

impl ResultsQuery {
    /// Captures the current backend URL and time span from `store`.
    pub fn from_store(store: &SharedConfigStore) -> Self {
        Self::new(store.get_backend_url(), store.get_time_span_minutes())
    }

    /// Query for the first page of results no older than `max_age_min`.
    pub fn new(backend_url: impl Into<String>, max_age_min: i64) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            max_age_min,
            label: None,
            offset: 0,
            limit: MAX_LIMIT,
        }
    }

    /// Restricts the query to one result label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Skips the first `offset` results.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the page size, capped at [`MAX_LIMIT`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    /// Renders the full request URL.
    ///
    /// Default paging (`offset = 0`, `limit = 100`) is left out of the query
    /// string. An absolute backend URL is parsed and normalized; anything
    /// else (the empty blank-preset URL included) is used as a plain prefix.
    pub fn url(&self) -> String {
        let base = format!("{}{}", self.backend_url, RESULTS_PATH);
        let pairs = self.query_pairs();
        match Url::parse(&base) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(&pairs);
                url.to_string()
            }
            Err(_) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&pairs)
                    .finish();
                format!("{base}?{query}")
            }
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("maxAgeMin", self.max_age_min.to_string())];
        if let Some(label) = &self.label {
            pairs.push(("label", label.clone()));
        }
        if self.offset != 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        if self.limit != MAX_LIMIT {
            pairs.push(("limit", self.limit.to_string()));
        }
        pairs
    }

    /// Calls `on_change` with a fresh query whenever the backend URL or the
    /// time span changes, starting with the current one.
    ///
    /// Both subscriptions are returned; dropping them stops the updates.
    pub fn watch(
        store: &SharedConfigStore,
        on_change: impl FnMut(&ResultsQuery) + 'static,
    ) -> [Subscription; 2] {
        let on_change = Rc::new(RefCell::new(on_change));

        let reader = store.clone();
        let notify = Rc::clone(&on_change);
        let url_sub = store.backend_url().subscribe(move |_| {
            (&mut *notify.borrow_mut())(&ResultsQuery::from_store(&reader));
        });

        // The first subscription already delivered the initial query.
        let reader = store.clone();
        let mut initial = true;
        let span_sub = store.time_span_minutes().subscribe(move |_| {
            if std::mem::take(&mut initial) {
                return;
            }
            (&mut *on_change.borrow_mut())(&ResultsQuery::from_store(&reader));
        });

        [url_sub, span_sub]
    }
}

impl fmt::Display for ResultsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Whether the renderer should show the origins column right now.
pub fn origins_visible(store: &SharedConfigStore) -> bool {
    store.get_show_origins()
}
