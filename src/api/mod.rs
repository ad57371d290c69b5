// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod routes {
    pub use crate::routes::*;
}

pub mod webhook_handler {
    pub use crate::webhook_handler::*;
}

pub mod overlay_view {
    pub use crate::overlay_view::*;
}

pub mod screen {
    pub use crate::screen::*;
}
