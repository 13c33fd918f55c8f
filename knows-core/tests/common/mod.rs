use std::{io::Write as _, path::PathBuf};

use knows_core::{Schema, TypeRegistry};
use knows_test_support::profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use tempfile::TempDir;

/// Proptest configuration honouring `PROGTEST_CASES` and `KNOWS_PBT_FORK`.
#[must_use]
#[allow(dead_code, reason = "not every suite runs property tests")]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Writes `contents` to `name` inside a fresh temporary directory.
#[allow(dead_code, reason = "not every suite writes schema files")]
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create schema file");
    file.write_all(contents.as_bytes()).expect("write schema file");
    (dir, path)
}

/// Parses an inline schema with the standard registry.
#[allow(dead_code, reason = "not every suite parses schemas")]
pub fn schema(text: &str) -> Schema {
    Schema::from_json_str(text, TypeRegistry::standard()).expect("schema must be valid")
}
