//! Typed parts of a presentation package

mod embedded;

pub use embedded::{EmbeddedPackageKind, EmbeddedPackagePart, ProgId};
