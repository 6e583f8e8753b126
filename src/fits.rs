//! Read science pixel data from ACS and WFC3 FITS files.
//!
//! RAW, FLT, and FLC files keep their pixel grids in numbered
//! image extensions behind a header-only primary HDU. The
//! first science grid always sits at extension 1. Full-frame
//! exposures from the two-chip detectors ([`Detector::Uvis`],
//! [`Detector::Wfc`]) carry the second chip in a further SCI
//! extension at index 4, which is stacked beneath the first
//! chip here so the caller sees one grid for the whole focal
//! plane.
//!
//! The file is opened read-only and dropped before this module
//! returns; everything downstream works on the in-memory grid.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use fitsio::FitsFile;
use ndarray::{s, Array2};

/// Extension index of the first science grid.
const FIRST_SCI_HDU: usize = 1;
/// Extension index of the second chip in full-frame files.
const SECOND_SCI_HDU: usize = 4;
/// EXTNAME value marking a science extension.
const SCI_EXTNAME: &str = "SCI";

/// Detector that produced the exposure, parsed from the
/// `DETECTOR` keyword of the primary header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detector {
    /// WFC3 UVIS channel, two chips.
    Uvis,
    /// ACS Wide Field Channel, two chips.
    Wfc,
    /// Any single-chip detector (e.g. WFC3 IR, ACS HRC/SBC).
    Other(String),
}

impl Detector {
    fn from_header(value: &str) -> Self {
        match value.trim() {
            "UVIS" => Detector::Uvis,
            "WFC" => Detector::Wfc,
            other => Detector::Other(other.to_string()),
        }
    }

    /// Whether full-frame exposures from this detector split
    /// the focal plane across two SCI extensions.
    pub fn is_full_frame(&self) -> bool {
        matches!(self, Detector::Uvis | Detector::Wfc)
    }
}

/// Science pixel data read from one exposure.
#[derive(Debug)]
pub struct SciFrame {
    pub detector: Detector,
    pub data: Array2<f64>,
}

impl SciFrame {
    /// Read the science grid from a RAW, FLT, or FLC file.
    ///
    /// For full-frame UVIS and WFC exposures the second chip
    /// is stacked beneath the first, doubling the height.
    /// Subarray files from those detectors have no extension
    /// 4 and convert from extension 1 alone.
    pub fn from_fits_path(path: &Path) -> Result<Self> {
        let mut fits =
            FitsFile::open(path).with_context(|| format!("could not open {:?}", path))?;

        let primary = fits.hdu(0)?;
        let detector: String = primary
            .read_key(&mut fits, "DETECTOR")
            .context("primary header has no DETECTOR")?;
        let detector = Detector::from_header(&detector);

        let mut data = read_grid(&mut fits, FIRST_SCI_HDU)?;
        if detector.is_full_frame() && second_chip_present(&mut fits)? {
            let second = read_grid(&mut fits, SECOND_SCI_HDU)?;
            data = stack_chips(data, second)?;
        }

        Ok(SciFrame { detector, data })
    }
}

/// Read one extension's pixel grid as `f64`, letting cfitsio
/// apply any BSCALE/BZERO calibration on the way in.
fn read_grid(fits: &mut FitsFile, idx: usize) -> Result<Array2<f64>> {
    let hdu = fits
        .hdu(idx)
        .with_context(|| format!("file has no extension {}", idx))?;

    let width: i64 = hdu
        .read_key(fits, "NAXIS1")
        .with_context(|| format!("extension {} has no NAXIS1", idx))?;
    let height: i64 = hdu
        .read_key(fits, "NAXIS2")
        .with_context(|| format!("extension {} has no NAXIS2", idx))?;

    let pixels: Vec<f64> = hdu
        .read_image(fits)
        .with_context(|| format!("reading pixel data from extension {}", idx))?;

    Array2::from_shape_vec((height as usize, width as usize), pixels)
        .with_context(|| format!("extension {} data does not match its NAXIS keywords", idx))
}

/// Whether the file carries a second chip: more than 4 HDUs,
/// with extension 4 labelled SCI. A present extension 4 that
/// lacks EXTNAME is a malformed file, not a subarray.
fn second_chip_present(fits: &mut FitsFile) -> Result<bool> {
    if fits.iter().count() <= SECOND_SCI_HDU {
        return Ok(false);
    }
    let hdu = fits.hdu(SECOND_SCI_HDU)?;
    let extname: String = hdu
        .read_key(fits, "EXTNAME")
        .with_context(|| format!("extension {} has no EXTNAME", SECOND_SCI_HDU))?;
    Ok(extname.trim() == SCI_EXTNAME)
}

/// Stack the two chips of a full-frame readout into one grid,
/// first chip on top.
fn stack_chips(first: Array2<f64>, second: Array2<f64>) -> Result<Array2<f64>> {
    let (first_ht, width) = first.dim();
    let (second_ht, second_wid) = second.dim();
    ensure!(
        width == second_wid,
        "mismatched chip widths: {} != {}",
        width,
        second_wid
    );

    let mut combined = Array2::zeros((first_ht + second_ht, width));
    combined.slice_mut(s![..first_ht, ..]).assign(&first);
    combined.slice_mut(s![first_ht.., ..]).assign(&second);
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_test_fits;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn reads_single_chip_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iabc01x1q_flt.fits");
        let data = array![[1., 2., 3.], [4., 5., 6.]];
        write_test_fits(&path, Some("IR"), &[("SCI", &data)]).unwrap();

        let frame = SciFrame::from_fits_path(&path).unwrap();
        assert_eq!(frame.detector, Detector::Other("IR".to_string()));
        assert_eq!(frame.data, data);
    }

    #[test]
    fn stacks_full_frame_chips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jabc01x1q_flc.fits");
        let chip1 = Array2::from_elem((2, 3), 1.);
        let chip2 = Array2::from_elem((2, 3), 2.);
        let aux = Array2::zeros((2, 3));
        write_test_fits(
            &path,
            Some("WFC"),
            &[("SCI", &chip1), ("ERR", &aux), ("DQ", &aux), ("SCI", &chip2)],
        )
        .unwrap();

        let frame = SciFrame::from_fits_path(&path).unwrap();
        assert_eq!(frame.detector, Detector::Wfc);
        assert_eq!(frame.data.dim(), (4, 3));
        assert_eq!(frame.data[[0, 0]], 1.);
        assert_eq!(frame.data[[1, 2]], 1.);
        assert_eq!(frame.data[[2, 0]], 2.);
        assert_eq!(frame.data[[3, 2]], 2.);
    }

    #[test]
    fn subarray_from_full_frame_detector_reads_one_chip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iabc01x2q_raw.fits");
        let chip = Array2::from_elem((2, 2), 3.);
        write_test_fits(&path, Some("UVIS"), &[("SCI", &chip)]).unwrap();

        let frame = SciFrame::from_fits_path(&path).unwrap();
        assert_eq!(frame.detector, Detector::Uvis);
        assert_eq!(frame.data.dim(), (2, 2));
    }

    #[test]
    fn non_sci_fourth_extension_is_not_stacked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jabc01x2q_flt.fits");
        let chip = Array2::from_elem((2, 3), 1.);
        let aux = Array2::zeros((2, 3));
        write_test_fits(
            &path,
            Some("WFC"),
            &[("SCI", &chip), ("ERR", &aux), ("DQ", &aux), ("WHT", &aux)],
        )
        .unwrap();

        let frame = SciFrame::from_fits_path(&path).unwrap();
        assert_eq!(frame.data.dim(), (2, 3));
    }

    #[test]
    fn rejects_mismatched_chip_widths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jabc01x3q_flc.fits");
        let chip1 = Array2::from_elem((2, 3), 1.);
        let chip2 = Array2::from_elem((2, 4), 2.);
        let aux = Array2::zeros((2, 3));
        write_test_fits(
            &path,
            Some("WFC"),
            &[("SCI", &chip1), ("ERR", &aux), ("DQ", &aux), ("SCI", &chip2)],
        )
        .unwrap();

        let err = SciFrame::from_fits_path(&path).unwrap_err();
        assert!(err.to_string().contains("mismatched chip widths"));
    }

    #[test]
    fn missing_detector_keyword_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_detector.fits");
        let chip = Array2::from_elem((2, 2), 1.);
        write_test_fits(&path, None, &[("SCI", &chip)]).unwrap();

        let err = SciFrame::from_fits_path(&path).unwrap_err();
        assert!(err.to_string().contains("DETECTOR"));
    }

    #[test]
    fn missing_file_fails() {
        assert!(SciFrame::from_fits_path(Path::new("nowhere_flt.fits")).is_err());
    }
}
