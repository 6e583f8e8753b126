mod args;

use anyhow::Result;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use quicklook::make_jpeg;

use crate::args::Args;

fn main() -> Result<()> {
    let args = Args::from_cmd_line()?;

    let bar = ProgressBar::new(args.paths.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {wide_bar:cyan/blue} {pos:>7}/{len:7}"),
    );

    use rayon::prelude::*;
    let count = args
        .paths
        .par_iter()
        .progress_with(bar)
        .map(|p| -> Result<()> {
            make_jpeg(p)?;
            Ok(())
        })
        .try_fold(
            || 0usize,
            |acc, res| -> Result<_> {
                res?;
                Ok(acc + 1)
            },
        )
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    eprintln!("Processed {} images", count);
    Ok(())
}
