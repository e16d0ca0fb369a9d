// src/readers/runreader.rs

//! Implements a [`RunReader`], the run line stream.
//!
//! A `RunReader` starts one line past a run-header offset found by the
//! [`runlocator`] and yields the classified [`LogLine`]s of that run
//! only, stopping at the next run header (exclusive) or end of file.
//! Lines matching neither shape are skipped inline.
//!
//! The stream is lazy, finite, and single-pass; re-reading a run means
//! locating it again. The underlying file handle is owned by the reader
//! and released when it is dropped, early return or not.
//!
//! [`runlocator`]: crate::readers::runlocator
//! [`LogLine`]: crate::data::logline::LogLine

use crate::common::{FPath, File, FileOffset};
use crate::data::logline::{classify, LineClass, LogLine};
use crate::de_wrn;
use crate::readers::helpers::chomp;

use std::io::{BufRead, BufReader, Result, Seek, SeekFrom};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

pub struct RunReader {
    path: FPath,
    reader: BufReader<File>,
    /// Next run header or EOF was reached; the stream is exhausted.
    done: bool,
}

impl RunReader {
    /// Open `path` and position the stream one line past the run header
    /// at `offset`.
    pub fn open(
        path: &FPath,
        offset: FileOffset,
    ) -> Result<RunReader> {
        defn!("({:?}, {})", path, offset);
        let file: File = File::open(path)?;
        let mut reader: BufReader<File> = BufReader::new(file);
        reader.seek(SeekFrom::Start(offset))?;
        // skip the header line itself
        let mut header: String = String::new();
        reader.read_line(&mut header)?;
        defx!();

        Ok(RunReader {
            path: path.clone(),
            reader,
            done: false,
        })
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }
}

impl Iterator for RunReader {
    type Item = LogLine;

    fn next(&mut self) -> Option<LogLine> {
        if self.done {
            return None;
        }
        let mut line: String = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(_err) => {
                    // mid-run read failure ends the stream; the
                    // aggregation keeps what was read so far
                    de_wrn!("read_line error in {:?}: {}", self.path, _err);
                    self.done = true;
                    return None;
                }
            }
            chomp(&mut line);
            match classify(line.as_str()) {
                LineClass::Log(logline) => return Some(logline),
                LineClass::RunHeader => {
                    self.done = true;
                    return None;
                }
                LineClass::NoMatch => {}
            }
        }
    }
}
