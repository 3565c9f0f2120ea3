// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Running external programs with piped stdio.
//!
//! Used to hand generated code to an external compiler or interpreter and
//! collect what it prints. The front end itself never spawns anything.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::ProcessError;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Everything written to stdout
    pub stdout: Vec<u8>,
    /// Everything written to stderr
    pub stderr: Vec<u8>,
    /// The exit code
    pub exit_status: i32,
}

/// Runs `argv[0]` with the remaining arguments, feeds it `stdin` and waits.
///
/// A nonzero exit code is not an error; it is returned in
/// [`ProcessOutput::exit_status`]. A process killed by a signal has no exit
/// code and yields [`ProcessError::ExitedAbnormally`].
pub fn run_process<S: AsRef<str>>(argv: &[S], stdin: &[u8]) -> Result<ProcessOutput, ProcessError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(ProcessError::ForkFailed(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty argument vector",
        )));
    };

    let mut cmd = Command::new(program.as_ref());
    cmd.args(args.iter().map(AsRef::as_ref));
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!(program = program.as_ref(), args = args.len(), "spawning process");
    let mut child = cmd.spawn().map_err(ProcessError::ForkFailed)?;

    let mut child_stdin = child.stdin.take().ok_or_else(|| {
        ProcessError::FailedToCreatePipes(std::io::Error::other("stdin was not captured"))
    })?;

    // Write from another thread so a child that fills its stdout pipe before
    // reading all of stdin cannot deadlock us.
    let input = stdin.to_vec();
    let writer = thread::spawn(move || match child_stdin.write_all(&input) {
        // The child may exit without reading its input.
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    });

    let output = child
        .wait_with_output()
        .map_err(ProcessError::FailedToCreatePipes)?;

    writer
        .join()
        .map_err(|_| {
            ProcessError::FailedToCreatePipes(std::io::Error::other("stdin writer panicked"))
        })?
        .map_err(ProcessError::FailedToCreatePipes)?;

    let exit_status = output.status.code().ok_or(ProcessError::ExitedAbnormally)?;
    debug!(
        exit_status,
        stdout = output.stdout.len(),
        stderr = output.stderr.len(),
        "process finished"
    );

    Ok(ProcessOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        exit_status,
    })
}
