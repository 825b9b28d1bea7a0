pub mod openrouter;

pub use openrouter::OpenRouterBackend;
