//! Command implementations.

pub mod check;
pub mod dispatcher;
pub mod list;
pub mod plan;
pub mod run;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, PipelineLocation, CONFIG_ERROR_EXIT_CODE,
};
