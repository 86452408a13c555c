//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as storage,
//! speech output, remote snapshot sources and the live change channel.

pub mod clock;
pub mod publisher;
pub mod snapshot;
pub mod speech;
pub mod store;
