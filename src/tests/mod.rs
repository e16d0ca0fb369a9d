// src/tests/mod.rs

//! Tests for _irrlib_.
//!
//! Tests are placed at `src/tests/`, inside the `irrlib`. Tests placed
//! at top-level path `tests/` do not have crate-internal visibility.
//! While it is recommended to not require internal visibility for
//! testing, in practice that often makes tests difficult or impossible
//! to implement.

pub mod callstack_tests;
pub mod common;
pub mod logline_tests;
pub mod runreader_tests;
