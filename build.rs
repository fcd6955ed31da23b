fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Fetches the English tokenizer binary that `analysis::english` embeds.
    nlprule_build::BinaryBuilder::new(
        &["en"],
        std::env::var("OUT_DIR").expect("OUT_DIR is set when build.rs is running"),
    )
    .build()
    .expect("failed to build nlprule binaries")
    .validate()
    .expect("nlprule binaries failed validation");
}
