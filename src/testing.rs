//! Fixtures shared by the unit tests.

use std::path::Path;

use anyhow::Result;
use fitsio::{
    images::{ImageDescription, ImageType},
    FitsFile,
};
use ndarray::Array2;

/// Write a FITS file with a header-only primary HDU followed
/// by one image extension per `(EXTNAME, grid)` pair.
pub(crate) fn write_test_fits(
    path: &Path,
    detector: Option<&str>,
    extensions: &[(&str, &Array2<f64>)],
) -> Result<()> {
    let mut fits = FitsFile::create(path).open()?;

    if let Some(detector) = detector {
        let primary = fits.hdu(0)?;
        primary.write_key(&mut fits, "DETECTOR", detector.to_string())?;
    }

    for (extname, data) in extensions {
        let (ht, wid) = data.dim();
        let description = ImageDescription {
            data_type: ImageType::Double,
            dimensions: &[ht, wid],
        };
        let hdu = fits.create_image(extname.to_string(), &description)?;
        hdu.write_key(&mut fits, "EXTNAME", extname.to_string())?;
        let flat: Vec<f64> = data.iter().copied().collect();
        hdu.write_image(&mut fits, &flat)?;
    }

    Ok(())
}
