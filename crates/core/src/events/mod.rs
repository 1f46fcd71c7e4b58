//! Event collection access and time-window selection.

pub mod memory;
pub mod ports;
pub mod window;

pub use memory::InMemoryEventRepository;
pub use window::{days_until, next_local_midnight, EventWindowQuery};
