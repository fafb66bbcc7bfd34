mod transport;
mod ws_transport;

pub use transport::*;
pub use ws_transport::*;
