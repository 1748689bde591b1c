use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let output_dir = PathBuf::from(&crate_dir).join("include");

    // Create include directory if it doesn't exist
    std::fs::create_dir_all(&output_dir).unwrap();

    // Generate the C header
    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("FOOLANG_H")
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file(output_dir.join("foolang.h"));

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");
    println!("cargo:rerun-if-changed=src/memory.rs");
    println!("cargo:rerun-if-changed=src/context.rs");
    println!("cargo:rerun-if-changed=src/unit.rs");
    println!("cargo:rerun-if-changed=src/node.rs");
}
