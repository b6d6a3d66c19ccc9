//! Orders and checkout slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::{Order, OrderCreated};

/// Order slice actions.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// `POST /shop/order/create`.
    CreateNewOrder(Fetch<OrderCreated>),
    /// `GET /shop/order/list/:user`.
    GetAllOrdersByUser(Fetch<Vec<Order>>),
    /// `GET /shop/order/details/:id`.
    GetOrderDetails(Fetch<Order>),
    /// Closes the order details view.
    ResetOrderDetails,
}

impl OrderAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::CreateNewOrder(f) => format!("order/createNewOrder/{}", f.phase.label()),
            Self::GetAllOrdersByUser(f) => format!("order/getAllOrdersByUserId/{}", f.phase.label()),
            Self::GetOrderDetails(f) => format!("order/getOrderDetails/{}", f.phase.label()),
            Self::ResetOrderDetails => "order/resetOrderDetails".to_string(),
        }
    }
}

/// Order state.
#[derive(Debug, Clone, Default)]
pub struct OrderSlice {
    is_loading: bool,
    create_status: FetchStatus,
    list_status: FetchStatus,
    details_status: FetchStatus,
    approval_url: Option<String>,
    order_id: Option<String>,
    order_list: Vec<Order>,
    order_details: Option<Order>,
}

impl OrderSlice {
    /// Payment approval link of the order just created.
    #[must_use]
    pub fn approval_url(&self) -> Option<&str> {
        self.approval_url.as_deref()
    }

    /// Id of the order just created.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Orders of the signed-in user.
    #[must_use]
    pub fn order_list(&self) -> &[Order] {
        &self.order_list
    }

    /// Order opened in the details view.
    #[must_use]
    pub const fn order_details(&self) -> Option<&Order> {
        self.order_details.as_ref()
    }
}

impl Slice for OrderSlice {
    type Action = OrderAction;

    fn reduce(mut self, action: OrderAction, ordering: ResponseOrdering) -> Self {
        match action {
            OrderAction::CreateNewOrder(fetch) => {
                match self.create_status.observe(fetch, ordering) {
                    Outcome::Replace(created) => {
                        self.approval_url = Some(created.approval_url);
                        self.order_id = Some(created.order_id);
                    }
                    Outcome::Clear => {
                        self.approval_url = None;
                        self.order_id = None;
                    }
                    Outcome::Ignore => {}
                }
                self.is_loading = self.create_status.is_loading();
            }
            OrderAction::GetAllOrdersByUser(fetch) => {
                match self.list_status.observe(fetch, ordering) {
                    Outcome::Replace(orders) => self.order_list = orders,
                    Outcome::Clear => self.order_list.clear(),
                    Outcome::Ignore => {}
                }
                self.is_loading = self.list_status.is_loading();
            }
            OrderAction::GetOrderDetails(fetch) => {
                match self.details_status.observe(fetch, ordering) {
                    Outcome::Replace(order) => self.order_details = Some(order),
                    Outcome::Clear => self.order_details = None,
                    Outcome::Ignore => {}
                }
                self.is_loading = self.details_status.is_loading();
            }
            OrderAction::ResetOrderDetails => self.order_details = None,
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
    fn test_create_order_records_approval() {
        let created = OrderCreated {
            approval_url: "https://pay.example/approve".to_string(),
            order_id: "o1".to_string(),
        };
        let slice = OrderSlice::default()
            .reduce(OrderAction::CreateNewOrder(Fetch::pending(RequestId(1))), ORDER)
            .reduce(OrderAction::CreateNewOrder(Fetch::fulfilled(RequestId(1), created)), ORDER);

        assert!(!slice.is_loading());
        assert_eq!(slice.approval_url(), Some("https://pay.example/approve"));
        assert_eq!(slice.order_id(), Some("o1"));

        let slice = slice.reduce(
            OrderAction::CreateNewOrder(Fetch::rejected(RequestId(2), ShopError::network("down"))),
            ORDER,
        );
        assert!(slice.approval_url().is_none());
    }
}
