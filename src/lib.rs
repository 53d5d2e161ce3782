pub mod error;
pub mod model;
pub mod parsers;
pub mod services;
