//! Table controller - paging, search, filters and sort for one table.
//!
//! The controller composes the filter engine and option builder on top of a
//! host-supplied dataset. All transitions are synchronous and deterministic;
//! refresh timers and fetches belong to the host, which feeds new data in
//! through [`TableController::on_dataset_replaced`].

mod paging;
mod reset;
mod sort;
mod table;

pub use paging::{PageState, clamp_index, page_bounds, page_count};
pub use reset::{FilterControl, ResetNotice};
pub use sort::{Direction, Sort};
pub use table::{ControllerState, RenderedRow, TableController};
