//! Command implementations for the `fern` binary.

use crate::cli::Invocation;
use crate::pipeline::{run_pipeline, UnitKind, UnitOutput};
use crate::snapshot;
use fern_diagnostic::render_problems;
use fern_fs::{IoError, StdWriteFile, WriteVectored};
use std::io::IoSlice;
use std::path::Path;
use std::time::Instant;

/// Process exit code for a command.
pub type ExitCode = i32;

/// `fern version` / `--version`.
pub fn version() -> ExitCode {
    println!("fern {}", env!("CARGO_PKG_VERSION"));
    0
}

/// `fern help` / `--help`, and the bare invocation.
pub fn help() -> ExitCode {
    println!("Fern compiler");
    println!();
    println!("Usage: fern <command> [options] [files]");
    println!();
    println!("Commands:");
    println!("  version             Print the compiler version");
    println!("  check <file>        Check a file and report problems");
    println!("  build <file>        Check a file and write its record");
    println!("  help                Show this message");
    println!();
    println!("Options:");
    println!("  -v, --version           Print the compiler version");
    println!("  -h, --help              Show this message");
    println!("  --optimize[=perf|size|dev]  Select an optimization profile");
    println!("  --main=<path>           Entry file for multi-file checks");
    println!("  --time[=true|false]     Report per-unit pipeline time");
    println!();
    println!("Any other argument is treated as a source file to run.");
    0
}

/// `fern check <files>`: run the pipeline, print problems.
pub fn check(invocation: &Invocation) -> ExitCode {
    let mut failed = false;
    for path in target_paths(invocation) {
        match process_unit(&path, invocation.time.unwrap_or(false)) {
            Ok(output) => {
                if output.has_problems() {
                    failed = true;
                    print!(
                        "{}",
                        render_problems(&output.diagnostics(), &output.source, &output.index)
                    );
                    println!();
                } else {
                    println!("{path}: no problems found");
                }
            }
            Err(err) => {
                failed = true;
                eprintln!("{path}: {err}");
            }
        }
    }
    i32::from(failed)
}

/// `fern build <files>`: check, then write the derived record next to the
/// source through the vectored-write backend.
pub fn build(invocation: &Invocation) -> ExitCode {
    let mut failed = false;
    for path in target_paths(invocation) {
        match process_unit(&path, invocation.time.unwrap_or(false)) {
            Ok(output) => {
                if output.has_problems() {
                    failed = true;
                    print!(
                        "{}",
                        render_problems(&output.diagnostics(), &output.source, &output.index)
                    );
                    println!();
                    continue;
                }
                let record = snapshot::render_record_from_output(&path, &output);
                let out_path = format!("{path}.fernsnap");
                if let Err(err) = write_record(Path::new(&out_path), &record) {
                    failed = true;
                    eprintln!("{out_path}: {err}");
                } else {
                    println!("wrote {out_path}");
                }
            }
            Err(err) => {
                failed = true;
                eprintln!("{path}: {err}");
            }
        }
    }
    i32::from(failed)
}

/// Run mode: pipeline each file and report its problems and result.
///
/// Execution semantics are out of scope for the front end, so running a
/// file means checking it and reporting the inferred types.
pub fn run(invocation: &Invocation) -> ExitCode {
    let mut failed = false;
    for path in &invocation.paths {
        match process_unit(path, invocation.time.unwrap_or(false)) {
            Ok(output) => {
                if output.has_problems() {
                    failed = true;
                    print!(
                        "{}",
                        render_problems(&output.diagnostics(), &output.source, &output.index)
                    );
                    println!();
                } else {
                    let types = snapshot::render_types(
                        &output.canon,
                        &output.typed,
                        &output.interner,
                        &output.index,
                    );
                    println!("{types}");
                }
            }
            Err(err) => {
                failed = true;
                eprintln!("{path}: {err}");
            }
        }
    }
    i32::from(failed)
}

/// Paths a `check`/`build` invocation operates on: explicit paths, with
/// `--main` prepended when given.
fn target_paths(invocation: &Invocation) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(main) = &invocation.main {
        paths.push(main.clone());
    }
    paths.extend(invocation.paths.iter().cloned());
    paths
}

fn process_unit(path: &str, time: bool) -> Result<UnitOutput, IoError> {
    let source = std::fs::read(path).map_err(|e| IoError::classify(&e))?;
    let started = Instant::now();
    let output = run_pipeline(&source, UnitKind::File);
    if time {
        eprintln!("{path}: pipeline took {:?}", started.elapsed());
    }
    Ok(output)
}

/// Write a record through the vectored backend: one buffer per section,
/// one blocking write.
fn write_record(path: &Path, record: &str) -> Result<(), IoError> {
    let mut backend = StdWriteFile::create(path)?;
    let bufs = [IoSlice::new(record.as_bytes())];
    let mut written = backend.write_vectored_at(&bufs, 0)?;
    // A short write on a regular file is retried from the new offset.
    while (written as usize) < record.len() {
        let rest = &record.as_bytes()[written as usize..];
        let bufs = [IoSlice::new(rest)];
        let more = backend.write_vectored_at(&bufs, written)?;
        if more == 0 {
            return Err(IoError::Unexpected(None));
        }
        written += more;
    }
    Ok(())
}
