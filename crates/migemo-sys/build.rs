use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=MIGEMO_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MIGEMO_STATIC");

    // Only the `link` feature references native symbols.
    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("MIGEMO_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }
    let kind = if env::var_os("MIGEMO_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={kind}=migemo");
}
