use storefront_catalog::{
    catalog::{DisplayRange, MAX_OFFSET, Paginator, page_offset},
    routes::params::Pagination,
};

#[test]
fn empty_result_set_has_no_pages() {
    let paginator = Paginator::new(0, 10);
    assert_eq!(paginator.total_pages(), 0);
    assert_eq!(paginator.last_page(), 1);
    assert_eq!(paginator.display_range(1), None);
    assert_eq!(paginator.next_page(1), 1);
    assert_eq!(paginator.prev_page(1), 1);
    assert!(paginator.page_numbers().is_empty());
}

#[test]
fn partial_last_page() {
    let paginator = Paginator::new(25, 10);
    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(
        paginator.display_range(1),
        Some(DisplayRange { first: 1, last: 10 })
    );
    assert_eq!(
        paginator.display_range(3),
        Some(DisplayRange { first: 21, last: 25 })
    );
    assert_eq!(paginator.display_range(4), None);
    assert_eq!(paginator.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn exact_multiple_of_page_size() {
    let paginator = Paginator::new(30, 10);
    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(
        paginator.display_range(3),
        Some(DisplayRange { first: 21, last: 30 })
    );
}

#[test]
fn navigation_stays_in_bounds() {
    let paginator = Paginator::new(25, 10);
    assert_eq!(paginator.next_page(1), 2);
    assert_eq!(paginator.next_page(3), 3);
    assert_eq!(paginator.prev_page(3), 2);
    assert_eq!(paginator.prev_page(1), 1);
    assert_eq!(paginator.clamp_page(0), 1);
    assert_eq!(paginator.clamp_page(99), 3);
    assert!(paginator.contains_page(3));
    assert!(!paginator.contains_page(0));
    assert!(!paginator.contains_page(4));
}

#[test]
fn zero_page_size_is_treated_as_one() {
    let paginator = Paginator::new(3, 0);
    assert_eq!(paginator.page_size(), 1);
    assert_eq!(paginator.total_pages(), 3);
}

#[test]
fn offsets_saturate_for_huge_pages() {
    assert_eq!(page_offset(1, 10), 0);
    assert_eq!(page_offset(3, 10), 20);
    assert_eq!(page_offset(0, 10), 0);
    assert_eq!(page_offset(u64::MAX, 10), MAX_OFFSET);
    assert_eq!(MAX_OFFSET, i64::MAX as u64);
}

#[test]
fn user_listing_paging_handles_huge_pages() {
    let pagination = Pagination {
        page: Some(u64::MAX),
        limit: Some(10),
    };
    assert_eq!(pagination.normalize(100), (u64::MAX, 10, MAX_OFFSET));

    let pagination = Pagination {
        page: Some(2),
        limit: Some(500),
    };
    assert_eq!(pagination.normalize(100), (2, 100, 100));
}
