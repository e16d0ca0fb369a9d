// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

pub use std::fs::File;

// TODO: use `std::path::Path` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// A byte offset into a log file, as returned by the run locator and
/// consumed by the [`RunReader`].
///
/// [`RunReader`]: crate::readers::runreader::RunReader
pub type FileOffset = u64;

/// 1-based position of a classified log line within one file's run line
/// stream. Authoritative ordering key for call-stack reconstruction;
/// log timestamps only have millisecond resolution and may tie.
pub type LineNumber = usize;

/// A domain name; the process/module identity of a log line
/// (e.g. `amf`, `smf`).
pub type DomainName = String;

/// Name of an instrumented function, as carried by `timemarker` tags and
/// version 1 `state` tags.
pub type FunctionName = String;

/// A count of something. Make the intention clear.
pub type Count = u64;
