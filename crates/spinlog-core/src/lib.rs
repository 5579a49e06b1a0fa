pub mod catalog;
pub mod domain;
pub mod errors;
pub mod genres;
pub mod ports;
pub mod ranking;
pub mod services;

pub use errors::CoreError;
