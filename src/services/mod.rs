pub mod classifier;
pub mod envelope;
pub mod request_builder;

pub use classifier::{classify, OutcomeResolver};
pub use envelope::{Answer, NO_RESPONSE_FOUND};
pub use request_builder::RequestBuilder;
