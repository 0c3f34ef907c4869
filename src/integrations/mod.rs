//! External service integrations.

pub mod directory_client {
    pub use crate::directory_client::*;
}
