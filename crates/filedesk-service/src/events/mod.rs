//! In-process domain event bus.

pub mod bus;

pub use bus::EventBus;
