pub mod arxiv;
pub mod notion;

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Downloads the PDF at `url` into a new file at `dest`, returning the number of bytes written.
/// An existing file is never overwritten.
pub fn download_pdf(url: &str, dest: &Path) -> Result<u64> {
    debug!("Downloading {url}");
    let response = ureq::get(url)
        .set("Accept", "application/pdf")
        .call()?;

    let mut file = File::options()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => Error::FileExists(dest.to_string_lossy().into_owned()),
            _ => err.into(),
        })?;

    let progress = match response
        .header("Content-Length")
        .and_then(|len| len.parse::<u64>().ok())
    {
        Some(len) => ProgressBar::new(len).with_style(
            ProgressStyle::with_template("{bytes}/{total_bytes} [{wide_bar}] {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        ),
        None => ProgressBar::new_spinner(),
    };

    let mut reader = progress.wrap_read(response.into_reader());
    let written = match io::copy(&mut reader, &mut file) {
        Ok(n) => n,
        Err(err) => {
            progress.abandon();
            drop(file);
            // don't leave a truncated PDF behind
            let _ = fs::remove_file(dest);
            return Err(err.into());
        }
    };
    progress.finish_and_clear();

    info!("Saved {written} bytes to {}", dest.display());
    Ok(written)
}
