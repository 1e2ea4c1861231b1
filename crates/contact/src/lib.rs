mod controller;
mod field;
mod payload;
mod sender;
mod state;
mod validate;

pub use controller::*;
pub use field::*;
pub use payload::*;
pub use sender::*;
pub use state::*;
pub use validate::{
    EMAIL_INVALID, EMAIL_REQUIRED, MESSAGE_REQUIRED, MESSAGE_TOO_SHORT, NAME_REQUIRED,
};
