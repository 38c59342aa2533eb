use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::{Path, PathBuf};

/// A tracelens command isolated from the user's config files
pub fn tracelens(workdir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("tracelens");
    cmd.current_dir(workdir)
        .env_remove("TRACELENS_CONFIG")
        .env_remove("TRACELENS_LOG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", workdir)
        .env("HOME", workdir);
    cmd
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
