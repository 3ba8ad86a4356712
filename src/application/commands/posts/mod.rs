// src/application/commands/posts/mod.rs
mod create;
mod service;
mod update;

pub use create::CreatePostCommand;
pub use service::PostCommandService;
pub use update::UpdatePostCommand;
