pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod home;
    pub mod search;
    pub mod translate;
    pub mod vocabulary;
}

pub use router::create_router;
pub use types::{AppState, TranslationDirection};
