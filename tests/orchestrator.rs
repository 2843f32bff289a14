use std::{sync::Mutex, time::Duration};

use chrono::Utc;
use storefront_catalog::{
    catalog::{
        CatalogClientError, CatalogEvent, CatalogPage, CatalogService, CatalogView, Completion,
        FilterState, QueryRequest, SortOrder, drive,
    },
    models::Product,
};
use tokio::sync::mpsc;
use uuid::Uuid;

fn product(title: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        category: "seeds".into(),
        brand: "Green Leaf".into(),
        price: 100,
        discount_price: 90,
        rating: 4.5,
        stock: 10,
        deleted: false,
        created_at: Utc::now(),
    }
}

fn page(title: &str, total_items: u64) -> CatalogPage {
    CatalogPage {
        items: vec![product(title)],
        total_items,
    }
}

fn toggle(dimension: &str, value: &str, selected: bool) -> CatalogEvent {
    CatalogEvent::ToggleFilter {
        dimension: dimension.into(),
        value: value.into(),
        selected,
    }
}

#[test]
fn stale_response_is_discarded() {
    let mut view = CatalogView::new(FilterState::default());

    let r1 = view.handle(toggle("category", "seeds", true)).unwrap();
    let r2 = view.handle(toggle("brand", "FarmPro", true)).unwrap();
    assert!(r2.seq > r1.seq);

    assert_eq!(view.apply(r2.seq, Ok(page("second", 3))), Completion::Applied);
    assert_eq!(view.apply(r1.seq, Ok(page("first", 40))), Completion::Stale);

    assert_eq!(view.items()[0].title, "second");
    assert_eq!(view.total_items(), 3);
    assert!(!view.is_loading());
}

#[test]
fn failure_keeps_last_good_page() {
    let mut view = CatalogView::new(FilterState::default());

    let r1 = view.issue();
    view.apply(r1.seq, Ok(page("good", 25)));

    let r2 = view.handle(CatalogEvent::NextPage).unwrap();
    assert_eq!(r2.request.page, 2);
    assert_eq!(
        view.apply(r2.seq, Err(CatalogClientError::Status(503))),
        Completion::Failed
    );

    assert_eq!(view.items()[0].title, "good");
    assert_eq!(view.total_items(), 25);
    assert!(view.last_error().is_some());
    assert!(!view.is_loading());

    let r3 = view.handle(CatalogEvent::Refresh).unwrap();
    view.apply(r3.seq, Ok(page("recovered", 25)));
    assert_eq!(view.last_error(), None);
}

#[test]
fn unchanged_state_issues_no_request() {
    let mut view = CatalogView::new(FilterState::default());
    assert!(view.handle(toggle("category", "seeds", false)).is_none());
    assert!(view.handle(CatalogEvent::PrevPage).is_none());
    // nothing loaded yet, so there is only one page
    assert!(view.handle(CatalogEvent::NextPage).is_none());
    assert!(view.handle(CatalogEvent::ClearSort).is_none());
    assert_eq!(view.latest_seq(), 0);

    let tagged = view
        .handle(CatalogEvent::SetSort {
            field: "price".into(),
            direction: SortOrder::Asc,
        })
        .unwrap();
    assert_eq!(tagged.seq, 1);
    assert_eq!(tagged.request.to_query_string(), "_sort=price&_order=asc&_page=1&_limit=10");
}

#[test]
fn page_jumps_are_clamped_to_known_pages() {
    let mut view = CatalogView::new(FilterState::default());
    let r1 = view.issue();
    view.apply(r1.seq, Ok(page("first", 25)));

    let tagged = view.handle(CatalogEvent::GoToPage(9)).unwrap();
    assert_eq!(tagged.request.page, 3);
    assert!(view.handle(CatalogEvent::NextPage).is_none());

    let tagged = view.handle(toggle("category", "tools", true)).unwrap();
    assert_eq!(tagged.request.page, 1);
}

/// Answers with one product titled after the query. Requests filtered on seeds
/// alone are slow.
struct DelayedCatalog {
    seen: Mutex<Vec<QueryRequest>>,
}

impl CatalogService for DelayedCatalog {
    async fn fetch_page(&self, request: &QueryRequest) -> Result<CatalogPage, CatalogClientError> {
        self.seen.lock().unwrap().push(request.clone());
        let slow = request.filters.contains("category", "seeds")
            && !request.filters.contains("brand", "FarmPro");
        let delay = if slow { 200 } else { 5 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(page(&request.to_query_string(), 12))
    }
}

#[tokio::test]
async fn slow_superseded_response_never_wins() {
    let client = DelayedCatalog {
        seen: Mutex::new(Vec::new()),
    };
    let mut view = CatalogView::new(FilterState::default());
    let (tx, rx) = mpsc::channel(8);

    tx.send(toggle("category", "seeds", true)).await.unwrap();
    tx.send(toggle("brand", "FarmPro", true)).await.unwrap();
    drop(tx);

    let mut applied_seqs = Vec::new();
    drive(&client, &mut view, rx, |view| {
        if !view.is_loading() {
            applied_seqs.push(view.latest_seq());
        }
    })
    .await;

    let expected = view.state().request();
    assert_eq!(view.latest_seq(), 3);
    assert_eq!(view.items()[0].title, expected.to_query_string());
    assert_eq!(view.total_items(), 12);
    assert!(!view.is_loading());
    assert_eq!(applied_seqs.last(), Some(&3));

    // initial load plus one request per event
    assert_eq!(client.seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn initial_load_happens_without_events() {
    let client = DelayedCatalog {
        seen: Mutex::new(Vec::new()),
    };
    let mut view = CatalogView::new(FilterState::default());
    let (tx, rx) = mpsc::channel(1);
    drop(tx);

    drive(&client, &mut view, rx, |_| {}).await;

    assert_eq!(view.latest_seq(), 1);
    assert_eq!(view.total_items(), 12);
    assert_eq!(
        client.seen.lock().unwrap().as_slice(),
        &[QueryRequest::default()]
    );
}
