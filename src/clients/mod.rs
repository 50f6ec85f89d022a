pub mod http_transport;
pub mod transport;

pub use http_transport::HttpTransport;
pub use transport::{RawTransportResult, Transport};
