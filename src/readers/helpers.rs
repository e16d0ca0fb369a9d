// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use crate::common::FPath;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    let mut riter = path.rsplit(std::path::MAIN_SEPARATOR);

    FPath::from(riter.next().unwrap_or(""))
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    (*(path.to_string_lossy())).to_string()
}

/// Strip one trailing line ending, `\n` or `\r\n`, in place.
///
/// `BufRead::read_line` keeps the line ending; the classifier regexes
/// are anchored and expect it gone.
pub fn chomp(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
