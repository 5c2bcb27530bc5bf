//! Who may see and who may change blog content.
//!
//! Every function here is pure: no database, no clock. Handlers resolve the
//! entities and pass `now` in.

pub mod access;
pub mod authorization;
pub mod visibility;
