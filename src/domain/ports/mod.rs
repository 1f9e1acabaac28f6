mod diagnostic_port;
mod response_port;

pub use diagnostic_port::DiagnosticPort;
pub use response_port::{FromResponse, RawObject};
