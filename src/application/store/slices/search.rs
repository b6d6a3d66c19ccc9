//! Search results slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::Product;

/// Search slice actions.
#[derive(Debug, Clone)]
pub enum SearchAction {
    /// `GET /shop/search/:keyword`.
    GetSearchResults(Fetch<Vec<Product>>),
    /// Clears the results.
    ResetSearchResults,
}

impl SearchAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::GetSearchResults(fetch) => format!("search/getSearchResults/{}", fetch.phase.label()),
            Self::ResetSearchResults => "search/resetSearchResults".to_string(),
        }
    }
}

/// Products matching the last keyword search.
#[derive(Debug, Clone, Default)]
pub struct SearchSlice {
    status: FetchStatus,
    search_results: Vec<Product>,
}

impl SearchSlice {
    /// Results of the last search.
    #[must_use]
    pub fn search_results(&self) -> &[Product] {
        &self.search_results
    }
}

impl Slice for SearchSlice {
    type Action = SearchAction;

    fn reduce(mut self, action: SearchAction, ordering: ResponseOrdering) -> Self {
        match action {
            SearchAction::GetSearchResults(fetch) => match self.status.observe(fetch, ordering) {
                Outcome::Replace(results) => self.search_results = results,
                Outcome::Clear => self.search_results.clear(),
                Outcome::Ignore => {}
            },
            SearchAction::ResetSearchResults => self.search_results.clear(),
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
