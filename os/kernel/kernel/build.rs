use std::{env, path::PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let ld = manifest_dir.join("linker.ld");
    println!("cargo:rerun-if-changed={}", ld.display());

    // Host builds (unit tests, `cargo check` on the workspace) link normally.
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("-none") {
        println!("cargo:rustc-link-arg-bins=-T{}", ld.display());
        println!("cargo:rustc-link-arg-bins=-no-pie");
    }
}
