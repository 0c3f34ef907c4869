// Domain-layer modules and shared errors/models
pub mod query {
    pub use crate::query::*;
}

pub mod render {
    pub use crate::render::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
