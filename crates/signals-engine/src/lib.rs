//! Signal factory, lifecycle state machine, and orchestration.
//!
//! This crate turns indicator snapshots into Signal entities and walks
//! every open signal through its state machine on a fixed cadence:
//! - [`SignalFactory`] derives BUY/SELL recommendations and price levels
//! - [`SignalLifecycleManager`] re-evaluates active signals against fresh
//!   prices and trend data
//! - [`Orchestrator`] runs the generation and re-evaluation schedules and
//!   fans work out across the pair/timeframe matrix

pub mod factory;
pub mod lifecycle;
pub mod orchestrator;
pub mod publish;
pub mod store;
pub mod trend_cache;

pub use factory::{FactoryConfig, SignalFactory};
pub use lifecycle::{MarketTick, SignalLifecycleManager};
pub use orchestrator::{Orchestrator, OrchestratorConfig, ProviderRouter};
pub use publish::{BroadcastPublisher, TracingPublisher};
pub use store::MemorySignalStore;
pub use trend_cache::TrendCache;
