pub mod cli;
pub mod command;
pub mod config;
pub mod event;
pub mod logging;
pub mod supervisor;
pub mod utils;
pub mod workspace;

pub use crate::supervisor::ProcessSupervisor;
