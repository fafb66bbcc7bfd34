mod gateway;
mod identity;
mod ws_handler;

pub use gateway::*;
pub use identity::*;
pub use ws_handler::*;
