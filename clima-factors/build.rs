fn main() {
    // The service root is baked in with option_env!; rebuild when it changes.
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CLIMA_API_BASE");
}
