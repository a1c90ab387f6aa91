//! Shared fixture plumbing for the orchestrator's integration tests.

use std::fs;
use std::path::PathBuf;

pub const NS: &str = r#"xmlns:zofar="http://www.his.de/zofar/xml/questionnaire""#;

/// A throwaway XML file under the OS temp directory, removed on drop.
/// Avoids pulling in a `tempfile` dependency for inline-fixture tests.
pub struct TempXml {
    path: PathBuf,
}

impl TempXml {
    pub fn new(xml: &str) -> TempXml {
        let mut path = std::env::temp_dir();
        let unique = format!("flowcheck-itest-{}-{:x}.xml", std::process::id(), fnv(xml));
        path.push(unique);
        fs::write(&path, xml).expect("write fixture");
        TempXml { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempXml {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// A trivial content hash so concurrently-run tests with different fixture
/// bodies never collide on the same temp filename.
fn fnv(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in s.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
