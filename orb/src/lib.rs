//! Unit-sphere tessellation and transform math for the viewer.
//! Pure CPU; no GPU or window dependencies.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod mesh;
pub mod transform;

/// Returns the crate version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_has_three_components() {
        assert!(version().split('.').count() >= 3);
    }
}
