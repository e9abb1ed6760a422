//! Row state shared across recycled widgets.

mod row_state;

pub use row_state::{RowRecord, RowStateBinder, SAVED_STATE_KEY};
