//! Repository export regression test
//!
//! Builds a miniature repository, exports it with the production
//! exclusion rules, and packages the result as a zip bundle.

use shelfpix_export::{ExportOptions, dir_size, export_tree, zip_dir};
use shelfpix_test::RegParams;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn export_reg() {
    let mut rp = RegParams::new("export");

    let repo = tempdir().unwrap();
    write(&repo.path().join("client/src/App.tsx"), b"export default 1;");
    write(&repo.path().join("server/index.ts"), b"serve();");
    write(&repo.path().join("node_modules/react/index.js"), &[0u8; 4096]);
    write(&repo.path().join("dist/bundle.js"), &[0u8; 2048]);
    write(&repo.path().join("client/public/hero.png"), &[0u8; 8192]);
    write(&repo.path().join("client/public/logo.png"), &[1u8; 64]);
    write(&repo.path().join("README.md"), b"# repo");

    let options = ExportOptions::new()
        .exclude("node_modules")
        .exclude("dist")
        .exclude("*.png")
        .keep("logo");

    // Test 1: export copies source and branding, skips the rest
    let out = tempdir().unwrap();
    let summary = export_tree(repo.path(), out.path(), &options).unwrap();
    rp.compare_values(4.0, summary.files as f64, 0.0);

    let copied = |rel: &str| out.path().join(rel).exists() as u8 as f64;
    rp.compare_values(1.0, copied("client/src/App.tsx"), 0.0);
    rp.compare_values(1.0, copied("client/public/logo.png"), 0.0);
    rp.compare_values(0.0, copied("client/public/hero.png"), 0.0);
    rp.compare_values(0.0, copied("node_modules"), 0.0);
    rp.compare_values(0.0, copied("dist/bundle.js"), 0.0);

    // Test 2: the export is much smaller than the repository
    let before = dir_size(repo.path()).unwrap();
    let after = dir_size(out.path()).unwrap();
    rp.compare_values(1.0, (after < before / 10) as u8 as f64, 0.0);
    rp.compare_values(summary.bytes as f64, after as f64, 0.0);

    // Test 3: the zip bundle has one central directory entry per file
    let mut buffer = Vec::new();
    let bytes = zip_dir(out.path(), &mut buffer).unwrap();
    rp.compare_values(bytes as f64, buffer.len() as f64, 0.0);

    let eocd = buffer.len() - 22;
    let entries = u16::from_le_bytes([buffer[eocd + 10], buffer[eocd + 11]]);
    rp.compare_values(4.0, entries as f64, 0.0);

    assert!(rp.cleanup());
}
