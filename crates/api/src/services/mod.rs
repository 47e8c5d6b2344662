//! Operations that span storage and outbound side effects.

pub mod lifecycle;
