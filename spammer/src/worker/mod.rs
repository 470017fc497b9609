pub mod confirmation;
pub mod controller;
pub mod dispatch;
pub mod funding;

pub use confirmation::{Confirmation, ConfirmationWaiter};
pub use controller::DispatchController;
pub use dispatch::{DispatchLoop, DispatchOutcome, DispatchPacing};
pub use funding::FundingDistributor;
