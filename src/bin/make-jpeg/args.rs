use std::path::PathBuf;

use anyhow::Result;
use quicklook::{arg, args_parser};

pub struct Args {
    pub paths: Vec<PathBuf>,
}

impl Args {
    pub fn from_cmd_line() -> Result<Args> {
        let matches = args_parser!("make-jpeg")
            .about("Create JPEG previews from RAW, FLT, or FLC FITS files.")
            .arg(
                arg!("images")
                    .required(true)
                    .multiple(true)
                    .help("FITS file paths"),
            )
            .get_matches();

        let paths = matches
            .values_of("images")
            .unwrap()
            .map(|f| f.into())
            .collect();

        Ok(Args { paths })
    }
}
