mod hub;
mod hub_command;
mod participant;
mod room;
mod room_id_generator;
mod snapshot;

pub use hub::*;
pub use hub_command::*;
pub use participant::*;
pub use room::*;
pub use room_id_generator::*;
pub use snapshot::*;
