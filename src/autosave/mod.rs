//! Turns ledger transactions into scheduled auto-save transfers: select the qualifying
//! withdrawals, group them by the business day their transfer goes out, and report or create
//! one transfer per day.

mod emitter;
mod qualifier;
mod schedule;

pub use emitter::{emit_transfers, EmitSummary};
pub use qualifier::qualifying_entries;
pub use schedule::build_schedule;
