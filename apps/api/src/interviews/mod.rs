//! Interview scheduling for promoted candidates.

pub mod handlers;
pub mod scheduling;
pub mod slots;
