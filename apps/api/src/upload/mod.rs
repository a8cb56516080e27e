pub mod filename;
pub mod handlers;
