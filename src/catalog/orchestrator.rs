//! Client-side catalog controller.
//!
//! Every state change produces a new [`TaggedRequest`] whose sequence number is higher
//! than all earlier ones. Responses are applied through [`CatalogView::apply`], which
//! drops any response that does not carry the latest sequence number.

use futures::{StreamExt, stream::FuturesUnordered};
use tokio::sync::mpsc;

use crate::{
    catalog::{
        client::{CatalogClientError, CatalogPage, CatalogService},
        filter::FilterState,
        pagination::Paginator,
        query::{QueryRequest, SortOrder},
    },
    models::Product,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    ToggleFilter {
        dimension: String,
        value: String,
        selected: bool,
    },
    SetSort {
        field: String,
        direction: SortOrder,
    },
    ClearSort,
    SetScope {
        admin: bool,
    },
    GoToPage(u64),
    NextPage,
    PrevPage,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRequest {
    pub seq: u64,
    pub request: QueryRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    state: FilterState,
    items: Vec<Product>,
    total_items: u64,
    latest_seq: u64,
    loading: bool,
    last_error: Option<String>,
}

impl CatalogView {
    pub fn new(state: FilterState) -> Self {
        Self {
            state,
            items: Vec::new(),
            total_items: 0,
            latest_seq: 0,
            loading: false,
            last_error: None,
        }
    }

    /// Applies a user event. Returns the request to issue, or `None` when the event
    /// left the browsing state unchanged.
    pub fn handle(&mut self, event: CatalogEvent) -> Option<TaggedRequest> {
        let changed = match event {
            CatalogEvent::ToggleFilter {
                dimension,
                value,
                selected,
            } => self.state.toggle_filter_value(&dimension, &value, selected),
            CatalogEvent::SetSort { field, direction } => self.state.set_sort(field, direction),
            CatalogEvent::ClearSort => self.state.clear_sort(),
            CatalogEvent::SetScope { admin } => self.state.set_admin_scope(admin),
            CatalogEvent::GoToPage(page) => {
                let page = self.paginator().clamp_page(page);
                self.state.set_page(page)
            }
            CatalogEvent::NextPage => {
                let page = self.paginator().next_page(self.state.page().page_number);
                self.state.set_page(page)
            }
            CatalogEvent::PrevPage => {
                let page = self.paginator().prev_page(self.state.page().page_number);
                self.state.set_page(page)
            }
            CatalogEvent::Refresh => true,
        };

        changed.then(|| self.issue())
    }

    /// Tags the request for the current state as the latest one.
    pub fn issue(&mut self) -> TaggedRequest {
        self.latest_seq += 1;
        self.loading = true;
        let request = self.state.request();
        tracing::debug!(seq = self.latest_seq, query = %request, "issuing catalog request");
        TaggedRequest {
            seq: self.latest_seq,
            request,
        }
    }

    /// Applies the outcome of request `seq`. A failure keeps the last good items and total.
    pub fn apply(&mut self, seq: u64, result: Result<CatalogPage, CatalogClientError>) -> Completion {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "dropping stale catalog response");
            return Completion::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(seq, total_items = page.total_items, "applied catalog page");
                self.items = page.items;
                self.total_items = page.total_items;
                self.last_error = None;
                Completion::Applied
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "catalog request failed");
                self.last_error = Some(err.to_string());
                Completion::Failed
            }
        }
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.total_items, self.state.page().page_size)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Runs a browsing session on the current task until `events` closes and every
/// in-flight request has completed. `on_change` sees the view after each visible change.
pub async fn drive<C, F>(
    client: &C,
    view: &mut CatalogView,
    mut events: mpsc::Receiver<CatalogEvent>,
    mut on_change: F,
) where
    C: CatalogService,
    F: FnMut(&CatalogView),
{
    let fetch = move |tagged: TaggedRequest| async move {
        let result = client.fetch_page(&tagged.request).await;
        (tagged.seq, result)
    };

    let mut in_flight = FuturesUnordered::new();
    in_flight.push(fetch(view.issue()));
    on_change(&*view);

    let mut events_open = true;
    loop {
        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    if let Some(tagged) = view.handle(event) {
                        in_flight.push(fetch(tagged));
                        on_change(&*view);
                    }
                }
                None => events_open = false,
            },
            Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                if view.apply(seq, result) != Completion::Stale {
                    on_change(&*view);
                }
            },
            else => break,
        }
    }
}
