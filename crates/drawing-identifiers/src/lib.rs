//! Identifier extraction for engineering drawing filenames
//!
//! Drawing filenames follow a fixed grammar:
//!
//! ```text
//! PREFIX-SEG-SEG-SEG-NUMBER-SHEET-LANG[_REV][.EXT]
//! BA21-OS-TOPS-ST-706406-002-EN_01.pdf
//! ```
//!
//! This crate provides:
//! - Sheet extraction (loose, always succeeds with a fallback)
//! - Structured identifier extraction (strict, used for cross-referencing)
//! - Filename normalization (case, revision suffix, extension)

pub mod extractors;
pub mod normalize;

pub use extractors::*;
pub use normalize::*;
