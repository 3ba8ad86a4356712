// src/application/ports/mod.rs
pub mod assets;
pub mod security;
pub mod time;
pub mod util;
