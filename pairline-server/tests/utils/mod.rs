pub mod signal_helpers;
pub mod test_client;

pub use mock_transport::*;
pub use signal_helpers::*;
pub use test_client::*;
