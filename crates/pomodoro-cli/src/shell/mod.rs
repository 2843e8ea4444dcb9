//! The terminal presentation shell around a timer session.

pub mod input;
pub mod notifier;
pub mod render;
pub mod scheduler;

pub use input::{parse_command, ShellCommand};
pub use render::Renderer;
pub use scheduler::TokioTickScheduler;
