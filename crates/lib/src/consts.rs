//! Fixed names and defaults shared across the crate.

pub const APP_NAME: &str = "crossbuild";

/// Go toolchain release the cross build directory is prepared with.
pub const GOLANG_VERSION: &str = "1.2.1";

pub const DEFAULT_PRODUCT: &str = "juju";
pub const DEFAULT_IMPORT_ROOT: &str = "github.com/juju/juju";

/// Location of the Inno Setup compiler inside the default wine prefix, relative to home.
pub const DEFAULT_ISCC_PATH: &str = ".wine/drive_c/Program Files (x86)/Inno Setup 5/ISCC.exe";

/// Installer script compiled by ISCC, relative to the installer directory.
pub const INSTALLER_SCRIPT: &str = "setup.iss";

/// Subdirectory of the installer directory where ISCC writes its output.
pub const INSTALLER_OUTPUT_DIR: &str = "output";

pub const CONFIG_FILENAME: &str = "config.toml";

pub const CONFIG_ENV: &str = "CROSSBUILD_CONFIG";
pub const GO_BINARY_ENV: &str = "CROSSBUILD_GO";
pub const ISCC_ENV: &str = "CROSSBUILD_ISCC";
