//! Domain layer with shop entities, errors and the backend port.

/// Carousel index arithmetic.
pub mod carousel;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Listing filters and sort order.
pub mod filter;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use carousel::Carousel;
pub use errors::ShopError;
pub use filter::{FilterParams, FilterSection, SortOption};
pub use ports::ShopApiPort;
