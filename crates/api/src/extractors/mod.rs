//! Request extractors.

pub mod producer_session;

pub use producer_session::ProducerSession;
