//! Saved addresses slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::Address;

/// Address slice actions.
#[derive(Debug, Clone)]
pub enum AddressAction {
    /// `GET /shop/address/get/:user`.
    FetchAllAddresses(Fetch<Vec<Address>>),
    /// `POST /shop/address/add`.
    AddNewAddress(Fetch<Address>),
    /// `PUT /shop/address/update/:user/:id`.
    EditAddress(Fetch<Address>),
    /// `DELETE /shop/address/delete/:user/:id`.
    DeleteAddress(Fetch<()>),
}

impl AddressAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        let (name, label) = match self {
            Self::FetchAllAddresses(f) => ("fetchAllAddresses", f.phase.label()),
            Self::AddNewAddress(f) => ("addNewAddress", f.phase.label()),
            Self::EditAddress(f) => ("editAddress", f.phase.label()),
            Self::DeleteAddress(f) => ("deleteAddress", f.phase.label()),
        };
        format!("address/{name}/{label}")
    }
}

/// The user's addresses. Only the list fetch writes data; mutations toggle
/// the loading flag and are followed by a refetch.
#[derive(Debug, Clone, Default)]
pub struct AddressSlice {
    is_loading: bool,
    list_status: FetchStatus,
    mutation_status: FetchStatus,
    address_list: Vec<Address>,
}

impl AddressSlice {
    /// Addresses of the signed-in user.
    #[must_use]
    pub fn address_list(&self) -> &[Address] {
        &self.address_list
    }

    fn observe_mutation<T>(&mut self, fetch: Fetch<T>, ordering: ResponseOrdering) {
        let _ = self.mutation_status.observe(fetch, ordering);
        self.is_loading = self.mutation_status.is_loading();
    }
}

impl Slice for AddressSlice {
    type Action = AddressAction;

    fn reduce(mut self, action: AddressAction, ordering: ResponseOrdering) -> Self {
        match action {
            AddressAction::FetchAllAddresses(fetch) => {
                match self.list_status.observe(fetch, ordering) {
                    Outcome::Replace(list) => self.address_list = list,
                    Outcome::Clear => self.address_list.clear(),
                    Outcome::Ignore => {}
                }
                self.is_loading = self.list_status.is_loading();
            }
            AddressAction::AddNewAddress(fetch) | AddressAction::EditAddress(fetch) => {
                self.observe_mutation(fetch, ordering);
            }
            AddressAction::DeleteAddress(fetch) => self.observe_mutation(fetch, ordering),
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
    use serde_json::json;

    const ORDER: ResponseOrdering = ResponseOrdering::LastResolved;

    fn address(id: &str) -> Address {
        serde_json::from_value(json!({"_id": id, "address": "12 Elm St"})).unwrap()
    }

    #[test]
    fn test_failed_mutation_keeps_list() {
        let slice = AddressSlice::default()
            .reduce(AddressAction::FetchAllAddresses(Fetch::fulfilled(RequestId(1), vec![address("a1")])), ORDER)
            .reduce(AddressAction::DeleteAddress(Fetch::pending(RequestId(2))), ORDER);
        assert!(slice.is_loading());

        let slice = slice.reduce(
            AddressAction::DeleteAddress(Fetch::rejected(RequestId(2), ShopError::network("down"))),
            ORDER,
        );

        assert!(!slice.is_loading());
        assert_eq!(slice.address_list().len(), 1);
    }

    #[test]
    fn test_failed_fetch_clears_list() {
        let slice = AddressSlice::default()
            .reduce(AddressAction::FetchAllAddresses(Fetch::fulfilled(RequestId(1), vec![address("a1")])), ORDER)
            .reduce(
                AddressAction::FetchAllAddresses(Fetch::rejected(RequestId(2), ShopError::network("down"))),
                ORDER,
            );

        assert!(slice.address_list().is_empty());
    }
}
