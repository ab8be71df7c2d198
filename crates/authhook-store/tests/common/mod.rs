use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Fresh data folder for a test
#[allow(dead_code)]
pub fn data_folder() -> TempDir {
    tempfile::tempdir().expect("create temp data folder")
}

/// Write `commands.yml` into `folder`
#[allow(dead_code)]
pub fn write_commands(folder: &Path, yaml: &str) {
    fs::write(folder.join("commands.yml"), yaml).expect("write commands.yml");
}

/// Write a fixture from `tests/fixtures` as `commands.yml` into `folder`
#[allow(dead_code)]
pub fn install_fixture(folder: &Path, fixture: &str) {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture);
    fs::copy(source, folder.join("commands.yml")).expect("copy fixture");
}
