//! crossbuild-lib: cross-build pipelines for juju clients and agents
//!
//! This crate provides the pieces a cross build is assembled from:
//! - `WorkspaceManager`: extracts a source tarball into a scoped temporary workspace
//! - `compile`: runs `go install` with an explicit GOROOT/GOPATH/GOOS/GOARCH selection
//! - `package`: turns a built binary into an installer or agent tarball
//! - `Pipeline`: sequences the three for one of the fixed build targets

pub mod compile;
pub mod config;
pub mod consts;
pub mod error;
pub mod exec;
pub mod package;
pub mod pipeline;
pub mod platform;
pub mod setup;
pub mod target;
pub mod util;
pub mod workspace;

pub use config::CrossbuildConfig;
pub use error::{CrossbuildError, Result};
pub use exec::{CommandRunner, SystemRunner};
pub use pipeline::{BuildReport, BuildRequest, Pipeline};
pub use target::TargetKind;
pub use workspace::WorkspaceManager;
