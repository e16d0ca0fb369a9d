// src/bin/irrstack.rs

//! Driver program _irrstack_ replays an aggregated run.
//!
//! Reads a snapshot JSON document written by _irr_ and prints the
//! reconstructed call-stack of one domain, one record per line, ordered
//! by source line number. With `--dump`, only lists the domains the
//! snapshot holds.
//!
//! [_irr_]: ../irr/index.html

#![allow(non_camel_case_types)]

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::Parser;
use ::const_format::concatcp;

use ::irrlib::data::snapshot::RunSnapshot;
use ::irrlib::e_err;
use ::irrlib::printer::callstack::domain_callstack;

#[derive(Parser, Debug)]
#[clap(
    about = "Replay the reconstructed call-stack of one domain from a snapshot JSON document.",
    name = "irrstack",
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
    /// Snapshot JSON document written by `irr`.
    instrumentation_json: PathBuf,

    /// List the domains available in the snapshot, then exit.
    #[clap(long)]
    dump: bool,

    /// Domain (network function) to replay, e.g. "amf".
    #[clap(long)]
    nf: Option<String>,
}

fn main() -> ExitCode {
    let args = CLI_Args::parse();

    let snapshot: RunSnapshot = match load_snapshot(&args.instrumentation_json) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            e_err!("{:?}", err);
            return ExitCode::FAILURE;
        }
    };

    if args.dump {
        for domain in snapshot.domains.keys() {
            println!("{}", domain);
        }
        return ExitCode::SUCCESS;
    }

    let domain: &str = match args.nf.as_deref() {
        Some(domain) => domain,
        None => {
            e_err!("No domain provided!");
            return ExitCode::FAILURE;
        }
    };

    match domain_callstack(&snapshot, domain) {
        Ok(records) => {
            for record in records.iter() {
                println!("{}", record.render());
            }
            ExitCode::SUCCESS
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            e_err!(
                "Domain {:?} not available in {:?}!",
                domain,
                args.instrumentation_json,
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            e_err!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_snapshot(path: &PathBuf) -> anyhow::Result<RunSnapshot> {
    let file: File =
        File::open(path.as_path()).with_context(|| format!("unable to open {:?}", path))?;
    let snapshot: RunSnapshot = serde_json::from_reader(file)
        .with_context(|| format!("unable to parse snapshot {:?}", path))?;

    Ok(snapshot)
}
