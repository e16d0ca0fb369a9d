// src/bin/irr.rs

//! Driver program _irr_ drives the [_irrlib_] aggregation pipeline.
//!
//! Processes user-passed command-line arguments, enumerates the log
//! files of the passed directory, and for each one locates the wanted
//! run, streams its lines, and folds the embedded instrumentation tags
//! into one [`RunSnapshot`]. The snapshot is written as a JSON document
//! `instrumentation-data-<run>.json` into the output directory.
//!
//! With `--dump`, only lists the candidate run identifiers found in the
//! first log file and aggregates nothing.
//!
//! [_irrlib_]: irrlib
//! [`RunSnapshot`]: irrlib::data::snapshot::RunSnapshot

#![allow(non_camel_case_types)]

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::Parser;
use ::const_format::concatcp;

use ::irrlib::data::datetime::{
    datetime_format_run,
    datetime_parse_run,
    DateTimeIOpt,
    DT_PATTERN_RUN,
};
use ::irrlib::data::snapshot::RunSnapshot;
use ::irrlib::e_err;
use ::irrlib::readers::runlocator::dump_runs;
use ::irrlib::readers::runprocessor::{log_dir_files, process_log_dir};

#[derive(Parser, Debug)]
#[clap(
    about = "Aggregate instrumentation events of one run from a directory of log files.",
    name = "irr",
    version = concatcp!(
        "(Instrumented Run Replayer)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Directory holding the per-process log files of the monitored
    /// system, one `*.log` file per process.
    logdir: PathBuf,

    /// Directory the snapshot JSON document is written to.
    /// Defaults to the current working directory.
    outdir: Option<PathBuf>,

    /// List candidate run identifiers found in the first log file,
    /// without aggregating ("discovery" mode).
    #[clap(long)]
    dump: bool,

    /// Aggregate the run closest to this identifier,
    /// e.g. "20260412-100000". Default is the most recent run.
    #[clap(short, long, verbatim_doc_comment)]
    run: Option<String>,

    /// Skip log files whose name contains this substring
    /// (non-instrumented producers). May be given multiple times.
    #[clap(long = "exclude", default_value = "mongodb", verbatim_doc_comment)]
    exclude: Vec<String>,
}

fn main() -> ExitCode {
    let args = CLI_Args::parse();

    let target: DateTimeIOpt = match args.run.as_deref() {
        Some(run_str) => match datetime_parse_run(run_str) {
            Some(dt) => Some(dt),
            None => {
                e_err!(
                    "unable to parse run identifier {:?} (expected format {:?})",
                    run_str,
                    DT_PATTERN_RUN,
                );
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let result = if args.dump {
        dump_mode(&args)
    } else {
        aggregate_mode(&args, &target)
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            e_err!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}

/// Discovery mode: report every run found in the first log file.
/// One file suffices; all processes of one run start together.
fn dump_mode(args: &CLI_Args) -> anyhow::Result<ExitCode> {
    let paths = log_dir_files(args.logdir.as_path(), args.exclude.as_slice())
        .with_context(|| format!("unable to read log directory {:?}", args.logdir))?;
    let path = match paths.first() {
        Some(path) => path,
        None => {
            eprintln!("No log files found in {:?}", args.logdir);
            return Ok(ExitCode::SUCCESS);
        }
    };
    for candidate in dump_runs(path)
        .with_context(|| format!("unable to scan {:?}", path))?
    {
        println!("Possible run: {}", datetime_format_run(&candidate));
    }

    Ok(ExitCode::SUCCESS)
}

fn aggregate_mode(
    args: &CLI_Args,
    target: &DateTimeIOpt,
) -> anyhow::Result<ExitCode> {
    let snapshot: RunSnapshot = match process_log_dir(
        args.logdir.as_path(),
        target,
        args.exclude.as_slice(),
    )
    .with_context(|| format!("unable to process log directory {:?}", args.logdir))?
    {
        Some(snapshot) => snapshot,
        None => {
            eprintln!("No instrumentation data found in {:?}", args.logdir);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let outdir: PathBuf = match args.outdir.as_ref() {
        Some(outdir) => outdir.clone(),
        None => std::env::current_dir().context("unable to determine current directory")?,
    };
    let outpath: PathBuf = outdir.join(format!(
        "instrumentation-data-{}.json",
        datetime_format_run(&snapshot.run_timestamp),
    ));
    let file: File =
        File::create(outpath.as_path()).with_context(|| format!("unable to create {:?}", outpath))?;
    serde_json::to_writer(file, &snapshot)
        .with_context(|| format!("unable to write {:?}", outpath))?;
    println!("Wrote parsed state and time data to {}", outpath.display());

    Ok(ExitCode::SUCCESS)
}
