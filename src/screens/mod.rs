//! Screen state machines for the admin surfaces
//!
//! Every screen is a plain state value driven by messages:
//! - `update(state, msg)` is pure and returns the next state plus the effects to run
//! - `run_effect(..)` performs one effect against the store and returns the
//!   message to feed back into `update`
//!
//! The host (embedded admin page or extension runtime) owns rendering and the
//! event loop. Navigation effects are returned for the host to perform.

pub mod action;
pub mod block;
pub mod create;
pub mod navigation;
pub mod overview;

pub use action::{ActionEffect, ActionMode, ActionMsg, ActionState};
pub use block::{relative_time, BlockEffect, BlockMsg, BlockRow, BlockState, DEFAULT_PAGE_SIZE};
pub use create::{CreateEffect, CreateMsg, CreateState, PickedResource, SelectedProduct};
pub use navigation::{ExtensionLink, LinkError};
pub use overview::{OverviewEffect, OverviewMsg, OverviewState};
