#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Binary target for the landing page bundle.
//!
//! In the browser it hands straight over to the page controllers. Native
//! builds have no document to drive, so they only explain how to produce
//! the wasm bundle.

#[cfg(target_arch = "wasm32")]
fn main() {
    growth_lab_web::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_NOTICE: &str = "growth-lab-web drives the landing page markup and has nothing to do \
outside a browser.\nBuild the bundle with `cargo build --target wasm32-unknown-unknown` and load \
it next to the page.\n";

#[cfg(not(target_arch = "wasm32"))]
fn explain(out: &mut impl std::io::Write) -> std::io::Result<()> {
    out.write_all(NATIVE_NOTICE.as_bytes())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    explain(&mut std::io::stderr().lock())
}
