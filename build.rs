//! Build script: creates a placeholder glint-ui dist directory when the `gui` feature is enabled.

use std::path::Path;

fn main() {
    // Only needed when the gui feature is enabled.
    if std::env::var("CARGO_FEATURE_GUI").is_err() {
        return;
    }

    // rust-embed needs the glint-ui dist directory to exist even before
    // `cargo xtask build-ui` has been run.
    let dist = Path::new("crates/glint-ui/dist");
    if !dist.exists() {
        std::fs::create_dir_all(dist).expect("failed to create dist dir");
    }

    let index = dist.join("index.html");
    if !index.exists() {
        std::fs::write(
            &index,
            "<!DOCTYPE html><html><body>glint-ui not built \
             (run `cargo xtask build-ui`)</body></html>",
        )
        .expect("failed to write placeholder index.html");
    }

    println!("cargo:rerun-if-changed=crates/glint-ui/dist");
}
