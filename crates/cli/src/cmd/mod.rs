mod build;
mod setup;

pub use build::{BuildOptions, cmd_build};
pub use setup::cmd_setup;
