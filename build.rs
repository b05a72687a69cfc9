use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// tables embedded into the library
const TABLES: [&str; 2] = ["nf.bin", "spec.bin"];

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ENS_NORMALIZE_DATA_DIR");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));

    let data_dir = match env::var_os("ENS_NORMALIZE_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(&env::var_os("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"))
            .join("data"),
    };

    for table in TABLES {
        let source = data_dir.join(table);
        let target = out_dir.join(table);

        println!("cargo:rerun-if-changed={}", source.display());

        let bytes = match fs::read(&source) {
            Ok(bytes) => bytes,
            Err(error) => {
                println!(
                    "cargo:warning={} not found ({}), the embedded tables will be empty",
                    source.display(),
                    error
                );
                vec![]
            }
        };

        fs::write(&target, bytes).expect("OUT_DIR is writable");
    }
}
