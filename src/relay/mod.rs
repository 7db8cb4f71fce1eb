// src/relay/mod.rs

//! Wrapper-side plumbing around a `ChildHandle`.
//!
//! - [`stream`] copies one child pipe to one parent stream, chunk by chunk.
//! - [`session`] runs both relays, forwards signals from a cancellation
//!   channel and waits for the exit notification.
//! - [`signals`] turns the wrapper's own OS signals into messages on that
//!   channel.

pub mod session;
pub mod signals;
pub mod stream;

pub use session::{EXIT_DRAIN_GRACE, Session, SessionOutcome};
pub use signals::os_signal_channel;
pub use stream::relay_stream;
