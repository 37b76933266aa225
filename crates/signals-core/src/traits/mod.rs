//! Trait seams between the engine and its collaborators.

mod provider;
mod publisher;
mod store;

pub use provider::{PriceSeriesProvider, SeriesFetch};
pub use publisher::{EventPublisher, SignalEvent};
pub use store::SignalStore;
