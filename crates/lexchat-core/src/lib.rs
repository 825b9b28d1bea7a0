pub mod agent;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod parties;
pub mod prompts;
pub mod session;
pub mod template;
pub mod types;

pub use types::*;
