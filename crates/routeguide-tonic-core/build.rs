/// Builds the gRPC client and server code for `routeguide.proto`.
///
/// The schema is parsed in-process with `protox`, so no system `protoc` is
/// needed. The resulting file descriptor set is handed to
/// `tonic-prost-build`, which emits message types and service bindings into
/// `OUT_DIR`, and is also written out as `routeguide_descriptor.bin` for the
/// reflection service.
///
/// # Files and Paths
///
/// - Proto file: `proto/routeguide.proto`
/// - Includes: `proto/`
///
/// # Output
///
/// Generated code is included in Rust via:
///
/// ```rust,ignore
/// pub mod proto {
///     tonic::include_proto!("routeguide");
/// }
/// ```
use prost::Message;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("routeguide_descriptor.bin");

    println!("cargo:rerun-if-changed=proto/routeguide.proto");

    let fds = protox::compile(["proto/routeguide.proto"], ["proto"])?;
    std::fs::write(&descriptor_path, fds.encode_to_vec())?;

    tonic_prost_build::configure().compile_fds(fds)?;

    Ok(())
}
