// src/debug/printers.rs

//! Print macros for user-facing diagnostics.
//!
//! Data-quality problems (unsupported tag versions, marker imbalance,
//! run mismatch) are reported with these and never raised as errors;
//! see the skip-and-continue policy in [`runprocessor`].
//!
//! [`runprocessor`]: crate::readers::runprocessor

/// `e`println! an `err`or
#[macro_export]
macro_rules! e_err {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("ERROR: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_err;

/// `e`println! a `warn`ing
#[macro_export]
macro_rules! e_wrn {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("WARNING: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_wrn;

/// `d`ebug `e`println! a `warn`ing; only in debug and test builds
#[macro_export]
macro_rules! de_wrn {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions, test))]
            eprint!("WARNING: ");
            #[cfg(any(debug_assertions, test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_wrn;
