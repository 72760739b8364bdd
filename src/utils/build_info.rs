//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `flappy-dart <date> (<commit>)`, as printed by `--version`.
pub fn version_string() -> String {
    format!("flappy-dart {} ({})", BUILD_DATE, BUILD_COMMIT)
}
