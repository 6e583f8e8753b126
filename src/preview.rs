//! Convert a single FITS exposure into a JPEG preview.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::{jpeg::JpegEncoder, ColorType};
use ndarray::Array2;

use crate::{fits::SciFrame, scale};

/// Output path for a preview: every `.fits` in the input
/// path becomes `.jpg`.
pub fn jpeg_path_for(path: &Path) -> Result<PathBuf> {
    let name = path.to_str().context("input path is not valid utf-8")?;
    Ok(PathBuf::from(name.replace(".fits", ".jpg")))
}

/// Create a JPEG preview next to a RAW, FLT, or FLC file and
/// return its path.
///
/// The science grid is clipped to its 1st and 99th
/// percentiles, stretched onto [0, 255], flipped to JPEG row
/// order, and written as a grayscale JPEG. Full-frame UVIS
/// and WFC exposures come out at double height with both
/// chips stacked.
pub fn make_jpeg(path: &Path) -> Result<PathBuf> {
    let frame = SciFrame::from_fits_path(path)?;
    let mut data = frame.data;

    scale::clip_outliers(&mut data)?;
    scale::stretch_to_display(&mut data)?;
    let display = scale::flip_and_quantize(&data);

    let out_path = jpeg_path_for(path)?;
    write_grayscale_jpeg(&display, &out_path)
        .with_context(|| format!("writing {:?}", out_path))?;
    Ok(out_path)
}

fn write_grayscale_jpeg(display: &Array2<u8>, path: &Path) -> Result<()> {
    let (ht, wid) = display.dim();
    let bytes: Vec<u8> = display.iter().copied().collect();

    let mut writer = BufWriter::new(File::create(path)?);
    let mut encoder = JpegEncoder::new(&mut writer);
    encoder.encode(&bytes, wid as u32, ht as u32, ColorType::L8)?;
    Ok(())
}
