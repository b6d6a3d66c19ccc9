//! Home banner slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::FeatureImage;

/// Feature slice actions.
#[derive(Debug, Clone)]
pub enum FeatureAction {
    /// `GET /common/feature/get`.
    GetFeatureImages(Fetch<Vec<FeatureImage>>),
}

impl FeatureAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::GetFeatureImages(fetch) => format!("feature/getFeatureImages/{}", fetch.phase.label()),
        }
    }
}

/// Home banner state.
#[derive(Debug, Clone, Default)]
pub struct FeatureSlice {
    status: FetchStatus,
    feature_image_list: Vec<FeatureImage>,
}

impl FeatureSlice {
    /// Banner images in display order.
    #[must_use]
    pub fn feature_image_list(&self) -> &[FeatureImage] {
        &self.feature_image_list
    }
}

impl Slice for FeatureSlice {
    type Action = FeatureAction;

    fn reduce(mut self, action: FeatureAction, ordering: ResponseOrdering) -> Self {
        let FeatureAction::GetFeatureImages(fetch) = action;
        match self.status.observe(fetch, ordering) {
            Outcome::Replace(images) => self.feature_image_list = images,
            Outcome::Clear => self.feature_image_list.clear(),
            Outcome::Ignore => {}
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
