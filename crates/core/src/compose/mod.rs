//! Message composition for the daily digest and the imminent alert.
//!
//! Composers are pure: they take already-selected events and a reference
//! instant and return text, so every formatting rule is unit-testable.

pub mod alert;
pub mod digest;

pub use alert::{AlertComposer, AlertPlan, Countdown, Headline};
pub use digest::DigestComposer;
