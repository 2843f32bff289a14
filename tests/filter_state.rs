use storefront_catalog::catalog::{
    FilterDimension, FilterSelection, FilterState, PageState, QueryRequest, SortOrder, SortSpec,
    build_request,
};

fn dimensions() -> Vec<FilterDimension> {
    vec![
        FilterDimension::from_values("category", ["seeds".to_string(), "tools".to_string()]),
        FilterDimension::from_values("brand", ["Agrimax".to_string(), "FarmPro".to_string()]),
    ]
}

#[test]
fn request_does_not_depend_on_toggle_order() {
    let mut first = FilterSelection::new();
    first.insert("category", "seeds");
    first.insert("brand", "FarmPro");
    first.insert("category", "tools");

    let mut second = FilterSelection::new();
    second.insert("category", "tools");
    second.insert("category", "seeds");
    second.insert("brand", "FarmPro");

    let page = PageState::default();
    let a = build_request(&first, None, &page, false);
    let b = build_request(&second, None, &page, false);
    assert_eq!(a, b);
    assert_eq!(a.to_query_string(), b.to_query_string());
    assert_eq!(
        a.to_query_string(),
        "brand=FarmPro&category=seeds&category=tools&_page=1&_limit=10"
    );
}

#[test]
fn deselected_dimension_disappears_from_request() {
    let mut state = FilterState::default();
    assert!(state.toggle_filter_value("category", "seeds", true));
    assert!(state.toggle_filter_value("category", "seeds", false));

    assert!(state.selection().is_empty());
    assert_eq!(state.request(), QueryRequest::default());
}

#[test]
fn removing_absent_value_is_a_no_op() {
    let mut state = FilterState::default();
    state.toggle_filter_value("category", "seeds", true);
    state.set_page(3);

    assert!(!state.toggle_filter_value("category", "tools", false));
    assert!(!state.toggle_filter_value("category", "seeds", true));
    assert_eq!(state.page().page_number, 3);
}

#[test]
fn filter_and_sort_changes_reset_page() {
    let mut state = FilterState::default();
    state.set_page(4);
    state.toggle_filter_value("brand", "Agrimax", true);
    assert_eq!(state.page().page_number, 1);

    state.set_page(2);
    state.set_sort("price", SortOrder::Asc);
    assert_eq!(state.page().page_number, 1);

    state.set_page(5);
    state.clear_sort();
    assert_eq!(state.page().page_number, 1);
    assert_eq!(state.sort(), None);
}

#[test]
fn page_change_keeps_filters_and_sort() {
    let mut state = FilterState::default();
    state.toggle_filter_value("category", "seeds", true);
    state.set_sort("rating", SortOrder::Desc);

    assert!(state.set_page(2));
    let request = state.request();
    assert_eq!(request.page, 2);
    assert!(request.filters.contains("category", "seeds"));
    assert_eq!(request.sort, Some(SortSpec::new("rating", SortOrder::Desc)));

    state.set_page(0);
    assert_eq!(state.page().page_number, 1);
}

#[test]
fn new_sort_replaces_previous_one() {
    let mut state = FilterState::default();
    state.set_sort("price", SortOrder::Asc);
    state.set_sort("rating", SortOrder::Desc);
    assert_eq!(state.sort(), Some(&SortSpec::new("rating", SortOrder::Desc)));

    state.set_page(3);
    assert!(!state.set_sort("rating", SortOrder::Desc));
    assert_eq!(state.page().page_number, 3);
}

#[test]
fn unknown_dimension_is_ignored_when_dimensions_are_known() {
    let dims = dimensions();
    let mut state = FilterState::default().with_dimensions(&dims);
    state.set_page(2);

    assert!(!state.toggle_filter_value("colour", "red", true));
    assert!(state.selection().is_empty());
    assert_eq!(state.page().page_number, 2);

    assert!(state.toggle_filter_value("brand", "FarmPro", true));
}

#[test]
fn admin_scope_is_carried_and_resets_page() {
    let mut state = FilterState::default();
    state.set_page(3);
    assert!(state.set_admin_scope(true));
    assert_eq!(state.page().page_number, 1);

    let request = state.request();
    assert!(request.admin);
    assert!(request.to_query_string().ends_with("&admin=true"));
    assert!(!state.set_admin_scope(true));
}

#[test]
fn dimension_options_are_sorted_and_unique() {
    let dim = FilterDimension::from_values(
        "brand",
        ["FarmPro".to_string(), "Agrimax".to_string(), "FarmPro".to_string()],
    );
    let values: Vec<&str> = dim.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["Agrimax", "FarmPro"]);
    assert!(dim.has_option("Agrimax"));
    assert!(!dim.has_option("BioGuard"));
}

#[test]
fn empty_values_are_never_selected() {
    let mut state = FilterState::default();
    state.set_page(2);

    assert!(!state.toggle_filter_value("category", "", true));
    assert!(state.selection().is_empty());
    assert_eq!(state.page().page_number, 2);

    let request = state.request();
    assert_eq!(QueryRequest::parse(&request.to_query_string()), Ok(request));
}
