//! External service integrations.

pub mod lookup_client {
    pub use crate::lookup_client::*;
}

pub mod webhook_models {
    pub use crate::webhook_models::*;
}
