pub mod client;
pub mod filter;
pub mod orchestrator;
pub mod pagination;
pub mod query;

pub use client::{CatalogClientError, CatalogPage, CatalogService, HttpCatalogClient};
pub use filter::{FilterDimension, FilterOption, FilterSelection, FilterState};
pub use orchestrator::{CatalogEvent, CatalogView, Completion, TaggedRequest, drive};
pub use pagination::{DisplayRange, MAX_OFFSET, Paginator, page_offset};
pub use query::{ITEMS_PER_PAGE, PageState, QueryRequest, SortOrder, SortSpec, build_request};
