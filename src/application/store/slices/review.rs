//! Product reviews slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::Review;

/// Review slice actions.
#[derive(Debug, Clone)]
pub enum ReviewAction {
    /// `GET /shop/review/:id`.
    GetReviews(Fetch<Vec<Review>>),
    /// Observed by listeners only; the slice keeps its state.
    AddReview(Fetch<Review>),
}

impl ReviewAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::GetReviews(fetch) => format!("review/getReviews/{}", fetch.phase.label()),
            Self::AddReview(fetch) => format!("review/addReview/{}", fetch.phase.label()),
        }
    }
}

/// Reviews of the product currently open.
#[derive(Debug, Clone, Default)]
pub struct ReviewSlice {
    status: FetchStatus,
    reviews: Vec<Review>,
}

impl ReviewSlice {
    /// Reviews of the open product.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }
}

impl Slice for ReviewSlice {
    type Action = ReviewAction;

    fn reduce(mut self, action: ReviewAction, ordering: ResponseOrdering) -> Self {
        match action {
            ReviewAction::GetReviews(fetch) => match self.status.observe(fetch, ordering) {
                Outcome::Replace(reviews) => self.reviews = reviews,
                Outcome::Clear => self.reviews.clear(),
                Outcome::Ignore => {}
            },
            ReviewAction::AddReview(_) => {}
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::fetch::RequestId;
    use crate::domain::errors::ShopError;
    use serde_json::json;

    fn review(id: &str) -> Review {
        serde_json::from_value(json!({"_id": id, "productId": "p1", "reviewValue": 4})).unwrap()
    }

    #[test]
    fn test_get_reviews_replaces_list() {
        let slice = ReviewSlice::default()
            .reduce(ReviewAction::GetReviews(Fetch::pending(RequestId(1))), ResponseOrdering::LastResolved)
            .reduce(
                ReviewAction::GetReviews(Fetch::fulfilled(RequestId(1), vec![review("r1"), review("r2")])),
                ResponseOrdering::LastResolved,
            );

        assert!(!slice.is_loading());
        assert_eq!(slice.reviews().len(), 2);
    }

    #[test]
    fn test_add_review_rejection_leaves_state() {
        let slice = ReviewSlice::default().reduce(
            ReviewAction::GetReviews(Fetch::fulfilled(RequestId(1), vec![review("r1")])),
            ResponseOrdering::LastResolved,
        );

        let slice = slice.reduce(
            ReviewAction::AddReview(Fetch::rejected(
                RequestId(2),
                ShopError::Http { status: 400, payload: Some(json!({"message": "nope"})) },
            )),
            ResponseOrdering::LastResolved,
        );

        assert_eq!(slice.reviews().len(), 1);
        assert!(!slice.is_loading());
    }
}
