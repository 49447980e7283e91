//! Build script: ensures the bundled chart assets exist for rust-embed.

use std::path::Path;

fn main() {
    // Only needed when the gui feature is enabled.
    if std::env::var("CARGO_FEATURE_GUI").is_err() {
        return;
    }

    // rust-embed needs the bundled echarts.min.js to exist at compile
    // time. Until `cargo xtask fetch-echarts` has been run, a placeholder
    // that only reports the missing library is written instead.
    let web = Path::new("assets/web");
    if !web.exists() {
        std::fs::create_dir_all(web).expect("failed to create assets/web");
    }

    let library = web.join("echarts.min.js");
    if !library.exists() {
        std::fs::write(
            &library,
            "console.error('echarts.min.js not bundled: run `cargo xtask \
             fetch-echarts`');\n",
        )
        .expect("failed to write placeholder echarts.min.js");
    }

    println!("cargo:rerun-if-changed=assets/web");
}
