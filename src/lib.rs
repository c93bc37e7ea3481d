// src/lib.rs
//
// bookmark-beautifier: Netscape bookmark export → standalone dark-themed HTML page
//
// - `convert` reads the whole export, runs the line pipeline, and overwrites the output.
// - `beautify` runs the same pipeline on an in-memory string.
// - See `pipeline` for the individual rewrite stages and `template` for the preamble.

pub mod error;
pub mod pipeline;
pub mod template;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use error::ConvertError;
pub use pipeline::{Document, LineRange, Options};
pub use template::Template;

/// Convert `input` into `output` with default options.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), ConvertError> {
    convert_with(input, output, &Options::default())
}

/// Convert `input` into `output`. The output is fully overwritten.
///
/// Nothing is written when the input cannot be read.
pub fn convert_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &Options,
) -> Result<(), ConvertError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let src = fs::read_to_string(input).map_err(|source| ConvertError::FileNotAccessible {
        path: input.to_path_buf(),
        source,
    })?;

    let out = beautify(&src, options);

    fs::write(output, &out).map_err(|source| ConvertError::WriteFailure {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes_in = src.len(),
        bytes_out = out.len(),
        "converted bookmark export"
    );
    Ok(())
}

/// Run the pipeline over `src` and return the finished document text.
pub fn beautify(src: &str, options: &Options) -> String {
    let doc = pipeline::run(pipeline::split_lines(src), options);
    pipeline::join_lines(&doc)
}

/// `<input-stem>_new.html` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bookmarks".to_string());
    input.with_file_name(format!("{stem}_new.html"))
}

/// Where the output of converting `input` goes.
///
/// A bare file name lands next to `input`; paths with a directory part are kept.
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        None => default_output_path(input),
        Some(name) if is_bare_file_name(name) => input.with_file_name(name),
        Some(path) => path.to_path_buf(),
    }
}

fn is_bare_file_name(path: &Path) -> bool {
    path.is_relative() && path.parent().map_or(true, |p| p.as_os_str().is_empty())
}
