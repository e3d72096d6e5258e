//! Instructions for preparing a cross build directory.
//!
//! Preparing the directory is a one-time manual job; this module only
//! renders the steps.

use std::path::Path;

use crate::config::CrossbuildConfig;

pub const CROSSCOMPILE_SOURCE: &str =
  "https://raw.githubusercontent.com/davecheney/golang-crosscompile/master/crosscompile.bash";
pub const INNO_SOURCE: &str = "http://www.jrsoftware.org/download.php/is-unicode.exe?site=1";

/// Render the manual setup steps for `build_dir`.
pub fn setup_instructions(config: &CrossbuildConfig, build_dir: &Path) -> String {
  let goroot = config.goroot(build_dir);
  let goroot = goroot.display();
  let build_dir = build_dir.display();
  let go_version = &config.go_version;

  format!(
    "Setting up a cross build directory is not automated. Run these steps by hand:

    mkdir -p {build_dir}
    cd {build_dir}
    sudo apt-get install dpkg-dev wine xvfb
    apt-get source golang-go={go_version}*
    export GOROOT={goroot}

    wget {CROSSCOMPILE_SOURCE} -O crosscompile.bash
    source crosscompile.bash
    go-crosscompile-build darwin/amd64
    go-crosscompile-build windows/386
    go-crosscompile-build windows/amd64

    wget '{INNO_SOURCE}' -O isetup-5.5.5-unicode.exe
    xvfb-run wine isetup-5.5.5-unicode.exe /verysilent
"
  )
}
