use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/plugin.proto");
    println!("cargo:rerun-if-env-changed=FORCE_CODEGEN");

    let generated_file = PathBuf::from("src/generated/gatehouse.plugins.v1.rs");

    // The generated code is committed so builds never need protoc. Set
    // FORCE_CODEGEN=1 after editing proto/plugin.proto to refresh it.
    let force_codegen = env::var("FORCE_CODEGEN").is_ok();
    if !force_codegen && generated_file.exists() {
        return Ok(());
    }

    let out_dir = PathBuf::from("src/generated");
    std::fs::create_dir_all(&out_dir)?;

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir(&out_dir)
        .compile_protos(&["proto/plugin.proto"], &["proto"])?;

    Ok(())
}
