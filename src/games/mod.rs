pub mod grader;
pub mod lifecycle;
pub mod payout;
pub mod settlement;
pub mod store;
pub mod types;

pub use lifecycle::GameLifecycle;
pub use payout::PayoutEngine;
pub use settlement::SettlementCoordinator;
pub use store::GameStore;
pub use types::*;
