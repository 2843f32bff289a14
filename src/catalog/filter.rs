//! Filter selection and the per-session browsing state built on top of it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::query::{PageState, QueryRequest, SortOrder, SortSpec, build_request};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// A named filtering axis (category, brand, ...) and its selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterDimension {
    pub id: String,
    pub options: Vec<FilterOption>,
}

/// Selected values per dimension. Dimensions with no selected value are not stored,
/// so two selections with the same membership always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, BTreeSet<String>>);

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes `value`. Returns whether membership changed.
    pub fn toggle(&mut self, dimension: &str, value: &str, selected: bool) -> bool {
        if selected {
            self.insert(dimension, value)
        } else {
            self.remove(dimension, value)
        }
    }

    /// Empty values are never stored; they do not survive a query string round trip.
    pub fn insert(&mut self, dimension: &str, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        self.0
            .entry(dimension.to_string())
            .or_default()
            .insert(value.to_string())
    }

    pub fn remove(&mut self, dimension: &str, value: &str) -> bool {
        let Some(values) = self.0.get_mut(dimension) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.0.remove(dimension);
        }
        removed
    }

    pub fn contains(&self, dimension: &str, value: &str) -> bool {
        self.0
            .get(dimension)
            .is_some_and(|values| values.contains(value))
    }

    pub fn values<'a>(&'a self, dimension: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.0
            .get(dimension)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(dimension, values)| (dimension.as_str(), values))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Selection, sort, page and visibility scope of one browsing session.
///
/// Any change to the selection, the sort or the scope puts the session back on page 1.
/// Changing the page never touches the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    known_dimensions: BTreeSet<String>,
    selection: FilterSelection,
    sort: Option<SortSpec>,
    page: PageState,
    admin: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(PageState::default().page_size)
    }
}

impl FilterState {
    pub fn new(page_size: u64) -> Self {
        Self {
            known_dimensions: BTreeSet::new(),
            selection: FilterSelection::new(),
            sort: None,
            page: PageState::first(page_size),
            admin: false,
        }
    }

    /// Restricts toggles to the given dimensions. Toggles on anything else become no-ops.
    pub fn with_dimensions<'a>(
        mut self,
        dimensions: impl IntoIterator<Item = &'a FilterDimension>,
    ) -> Self {
        self.known_dimensions = dimensions.into_iter().map(|d| d.id.clone()).collect();
        self
    }

    pub fn with_admin_scope(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn toggle_filter_value(&mut self, dimension: &str, value: &str, selected: bool) -> bool {
        if !self.known_dimensions.is_empty() && !self.known_dimensions.contains(dimension) {
            tracing::debug!(dimension, "ignoring toggle on unknown filter dimension");
            return false;
        }
        let changed = self.selection.toggle(dimension, value, selected);
        if changed {
            self.reset_page();
        }
        changed
    }

    pub fn set_sort(&mut self, field: impl Into<String>, direction: SortOrder) -> bool {
        self.replace_sort(Some(SortSpec::new(field, direction)))
    }

    pub fn clear_sort(&mut self) -> bool {
        self.replace_sort(None)
    }

    pub fn set_admin_scope(&mut self, admin: bool) -> bool {
        if self.admin == admin {
            return false;
        }
        self.admin = admin;
        self.reset_page();
        true
    }

    pub fn set_page(&mut self, page_number: u64) -> bool {
        let page_number = page_number.max(1);
        if self.page.page_number == page_number {
            return false;
        }
        self.page.page_number = page_number;
        true
    }

    pub fn request(&self) -> QueryRequest {
        build_request(&self.selection, self.sort.as_ref(), &self.page, self.admin)
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn is_admin_scope(&self) -> bool {
        self.admin
    }

    fn replace_sort(&mut self, sort: Option<SortSpec>) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.reset_page();
        true
    }

    fn reset_page(&mut self) {
        self.page.page_number = 1;
    }
}

impl FilterDimension {
    pub fn from_values(id: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        let options = values
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|value| FilterOption {
                label: value.clone(),
                value,
            })
            .collect();
        Self {
            id: id.into(),
            options,
        }
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}
