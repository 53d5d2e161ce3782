pub mod config;
pub mod emit;
pub mod encoding;
pub mod fanout;
pub mod loader;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod translate;
