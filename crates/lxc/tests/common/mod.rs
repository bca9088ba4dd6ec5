//! Common test utilities
#![allow(dead_code)]

use lxc::Lxc;
use lxc_runner::backends::fake::FakeRunner;
use std::path::PathBuf;
use std::sync::Arc;

/// Releases with captured fixtures; the last one resolves to the generic profile
pub const LXC_VERSIONS: &[&str] = &["0.7.5", "0.8.0-rc1", "0.9.0"];

/// Read a captured output file for the given release
pub fn lxc_fixture(version: &str, name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(version);
    path.push(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}

/// Fake toolset answering every read-only command from the fixtures of `version`,
/// with `lxc-ls` printing the given listing fixture
pub fn fake_host(version: &str, ls_fixture: &str) -> Arc<FakeRunner> {
    Arc::new(
        FakeRunner::new()
            .with_stdout("lxc-version", lxc_fixture(version, "lxc-version.out"))
            .with_stdout("lxc-ls", lxc_fixture(version, ls_fixture))
            .with_stdout("lxc-ps --lxc", lxc_fixture(version, "lxc-ps.out"))
            .with_stdout("lxc-checkconfig", lxc_fixture(version, "lxc-checkconfig.out")),
    )
}

/// Client over `fake_host`, keeping a handle on the fake to inspect issued commands
pub fn client(version: &str, ls_fixture: &str) -> (Lxc, Arc<FakeRunner>) {
    let runner = fake_host(version, ls_fixture);
    let lxc = Lxc::builder().shared_runner(runner.clone()).build();
    (lxc, runner)
}
