pub mod error;
pub mod migration;
pub mod schema;
pub mod state;
pub mod utils;
