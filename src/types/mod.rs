//! Response types shared by handlers.

mod response;

pub use response::{Created, MessageResponse};
