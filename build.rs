//! Re-run the build when the linker script or boot assembly changes.

fn main() {
    println!("cargo:rerun-if-changed=linker.ld");
    println!("cargo:rerun-if-changed=src/entry.asm");
}
