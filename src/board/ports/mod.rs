//! Port contracts used by the board.

pub mod gateway;

pub use gateway::{MoveGatewayError, TaskMoveGateway};
