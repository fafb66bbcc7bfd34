mod connection;

pub use connection::*;
