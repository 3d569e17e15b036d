pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
