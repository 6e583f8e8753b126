//! Create JPEG preview images from ACS and WFC3 exposures.
//!
//! The crate reads the science pixel grid from a RAW, FLT,
//! or FLC FITS file, stretches it for display, and writes a
//! grayscale JPEG next to the input:
//!
//! ```rust,no_run
//! # fn run() -> anyhow::Result<()> {
//! use std::path::Path;
//! quicklook::make_jpeg(Path::new("j12345_flc.fits"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Full-frame exposures from the two-chip detectors
//! (WFC3/UVIS and ACS/WFC) store each half of the focal
//! plane in its own SCI extension; those previews come out
//! at double height with both chips stacked. Other
//! instruments (e.g. STIS) and other file types (e.g. IMA)
//! are not supported.
//!
//! The display stretch clips the top and bottom 1% of pixels
//! before mapping the remaining range onto 8 bits, so hot
//! pixels and cosmic rays do not flatten the preview.

pub mod cli;
pub mod fits;
pub mod preview;
pub mod scale;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::fits::{Detector, SciFrame};
pub use crate::preview::{jpeg_path_for, make_jpeg};
