//! Product listing and details slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::Product;

/// Products slice actions.
#[derive(Debug, Clone)]
pub enum ProductsAction {
    /// `GET /shop/products/get` with filter and sort query.
    FetchAllFilteredProducts(Fetch<Vec<Product>>),
    /// `GET /shop/products/get/:id`.
    FetchProductDetails(Fetch<Product>),
    /// Closes the details view.
    SetProductDetails,
}

impl ProductsAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::FetchAllFilteredProducts(fetch) => {
                format!("products/fetchAllProducts/{}", fetch.phase.label())
            }
            Self::FetchProductDetails(fetch) => {
                format!("products/fetchProductDetails/{}", fetch.phase.label())
            }
            Self::SetProductDetails => "products/setProductDetails".to_string(),
        }
    }
}

/// Listing results and the product whose details are open.
///
/// Both fetches share one loading flag, driven by whichever phase arrived last.
#[derive(Debug, Clone, Default)]
pub struct ProductsSlice {
    is_loading: bool,
    list_status: FetchStatus,
    details_status: FetchStatus,
    product_list: Vec<Product>,
    product_details: Option<Product>,
}

impl ProductsSlice {
    /// Products of the current listing.
    #[must_use]
    pub fn product_list(&self) -> &[Product] {
        &self.product_list
    }

    /// Product opened in the details overlay.
    #[must_use]
    pub const fn product_details(&self) -> Option<&Product> {
        self.product_details.as_ref()
    }
}

impl Slice for ProductsSlice {
    type Action = ProductsAction;

    fn reduce(mut self, action: ProductsAction, ordering: ResponseOrdering) -> Self {
        match action {
            ProductsAction::FetchAllFilteredProducts(fetch) => {
                match self.list_status.observe(fetch, ordering) {
                    Outcome::Replace(list) => self.product_list = list,
                    Outcome::Clear => self.product_list.clear(),
                    Outcome::Ignore => {}
                }
                self.is_loading = self.list_status.is_loading();
            }
            ProductsAction::FetchProductDetails(fetch) => {
                match self.details_status.observe(fetch, ordering) {
                    Outcome::Replace(product) => self.product_details = Some(product),
                    Outcome::Clear => self.product_details = None,
                    Outcome::Ignore => {}
                }
                self.is_loading = self.details_status.is_loading();
            }
            ProductsAction::SetProductDetails => self.product_details = None,
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::fetch::RequestId;
    use crate::domain::errors::ShopError;

    const ORDER: ResponseOrdering = ResponseOrdering::LastResolved;

    #[test]
    fn test_details_open_and_close() {
        let slice = ProductsSlice::default()
            .reduce(ProductsAction::FetchProductDetails(Fetch::pending(RequestId(1))), ORDER)
            .reduce(
                ProductsAction::FetchProductDetails(Fetch::fulfilled(RequestId(1), Product::new("p1", "Drill"))),
                ORDER,
            );
        assert_eq!(slice.product_details().map(|p| p.id.as_str()), Some("p1"));

        let slice = slice.reduce(ProductsAction::SetProductDetails, ORDER);
        assert!(slice.product_details().is_none());
    }

    #[test]
    fn test_list_rejection_keeps_details() {
        let slice = ProductsSlice::default()
            .reduce(
                ProductsAction::FetchProductDetails(Fetch::fulfilled(RequestId(1), Product::new("p1", "Drill"))),
                ORDER,
            )
            .reduce(
                ProductsAction::FetchAllFilteredProducts(Fetch::fulfilled(RequestId(2), vec![Product::new("p2", "Saw")])),
                ORDER,
            )
            .reduce(ProductsAction::FetchAllFilteredProducts(Fetch::pending(RequestId(3))), ORDER)
            .reduce(
                ProductsAction::FetchAllFilteredProducts(Fetch::rejected(RequestId(3), ShopError::network("down"))),
                ORDER,
            );

        assert!(!slice.is_loading());
        assert!(slice.product_list().is_empty());
        assert!(slice.product_details().is_some());
    }

    #[test]
    fn test_loading_follows_last_phase() {
        let slice = ProductsSlice::default()
            .reduce(ProductsAction::FetchAllFilteredProducts(Fetch::pending(RequestId(1))), ORDER)
            .reduce(ProductsAction::FetchProductDetails(Fetch::pending(RequestId(2))), ORDER)
            .reduce(
                ProductsAction::FetchAllFilteredProducts(Fetch::fulfilled(RequestId(1), Vec::new())),
                ORDER,
            );

        assert!(!slice.is_loading());
    }
}
