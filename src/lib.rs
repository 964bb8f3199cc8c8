pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod settings;
