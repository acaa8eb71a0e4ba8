use hlsl_rs_gen::{Driver, GenerateOptions};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir = std::env::var("OUT_DIR").expect("Cargo did not set OUT_DIR");
    Driver::new(GenerateOptions::default())
        .expect("Failed to build the type registry")
        .run(&out_dir)
        .expect("Failed to generate the vector and matrix types");
}
