// Domain-layer modules and shared errors/models
pub mod call_events {
    pub use crate::call_events::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod normalizer {
    pub use crate::normalizer::*;
}

pub mod resolver {
    pub use crate::resolver::*;
}

pub mod errors {
    pub use crate::errors::*;
}

pub mod overlay {
    pub use crate::overlay::*;
}
