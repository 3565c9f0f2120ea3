// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Implementations of the `lex` and `parse` subcommands.
//!
//! Every input is handled on its own with a fresh lexer and parser, so
//! inputs are processed in parallel and the reports are printed afterwards
//! in argument order.

use std::borrow::Cow;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use kaleidoscope_core::{LexError, Lexer, LexerConfig, ParseError, Token, parse_with_config};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, InputArgs, LexArgs, ParseArgs};

/// One named source. The bytes are lexed as they are, valid UTF-8 or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub source: Vec<u8>,
}

/// How reports are rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub color: bool,
    pub quiet: bool,
}

/// Rendered lines for one input.
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub failed: bool,
}

/// Runs `kaleidoscope lex`.
pub fn lex(args: &LexArgs, cli: &Cli) -> Result<ExitCode> {
    let inputs = read_inputs(&args.input)?;
    let config = lexer_config(&args.input);
    let output = output_options(&args.input, cli);
    let reports = map_inputs(&inputs, |input| {
        lex_input(input, config, args.skip_comments, output)
    })?;
    Ok(print_reports(&inputs, &reports, output))
}

/// Runs `kaleidoscope parse`.
pub fn parse(args: &ParseArgs, cli: &Cli) -> Result<ExitCode> {
    let inputs = read_inputs(&args.input)?;
    let config = lexer_config(&args.input);
    let output = output_options(&args.input, cli);
    let reports = map_inputs(&inputs, |input| parse_input(input, config, output))?;
    Ok(print_reports(&inputs, &reports, output))
}

fn lexer_config(args: &InputArgs) -> LexerConfig {
    if args.no_octal {
        LexerConfig::without_octal()
    } else {
        LexerConfig::default()
    }
}

fn output_options(args: &InputArgs, cli: &Cli) -> Output {
    Output {
        json: args.json,
        color: !args.json && io::stdout().is_terminal(),
        quiet: cli.quiet,
    }
}

/// Collects inline expressions first, then files. With neither, reads stdin.
pub fn read_inputs(args: &InputArgs) -> Result<Vec<Input>> {
    let mut inputs = Vec::with_capacity(args.eval.len() + args.files.len());

    for (i, text) in args.eval.iter().enumerate() {
        let name = if args.eval.len() == 1 {
            "<expr>".to_string()
        } else {
            format!("<expr {}>", i + 1)
        };
        inputs.push(Input {
            name,
            source: text.clone().into_bytes(),
        });
    }

    let mut stdin_used = false;
    for path in &args.files {
        if path == Path::new("-") {
            if stdin_used {
                anyhow::bail!("standard input given more than once");
            }
            stdin_used = true;
            inputs.push(read_stdin()?);
        } else {
            let source =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            inputs.push(Input {
                name: path.display().to_string(),
                source,
            });
        }
    }

    if inputs.is_empty() {
        inputs.push(read_stdin()?);
    }

    info!(count = inputs.len(), "collected inputs");
    Ok(inputs)
}

fn read_stdin() -> Result<Input> {
    let mut source = Vec::new();
    io::stdin()
        .read_to_end(&mut source)
        .context("failed to read standard input")?;
    Ok(Input {
        name: "<stdin>".to_string(),
        source,
    })
}

/// Applies `f` to every input, in parallel when the `parallel` feature is on.
/// Results keep the order of `inputs`.
fn map_inputs<F>(inputs: &[Input], f: F) -> Result<Vec<Report>>
where
    F: Fn(&Input) -> Result<Report> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        inputs.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(f).collect()
    }
}

fn print_reports(inputs: &[Input], reports: &[Report], output: Output) -> ExitCode {
    let with_headers = !output.json && inputs.len() > 1;
    let mut failed = false;

    for (input, report) in inputs.iter().zip(reports) {
        failed |= report.failed;
        if report.lines.is_empty() {
            continue;
        }
        if with_headers {
            if output.color {
                println!("{}", format!("==> {} <==", input.name).bold());
            } else {
                println!("==> {} <==", input.name);
            }
        }
        for line in &report.lines {
            println!("{line}");
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LexRecord<'a> {
    Token {
        file: &'a str,
        token: Token,
        text: Cow<'a, str>,
    },
    Error {
        file: &'a str,
        error: LexError,
        message: String,
        text: Cow<'a, str>,
    },
}

/// Lexes one input to completion, continuing past lexical errors.
pub fn lex_input(
    input: &Input,
    config: LexerConfig,
    skip_comments: bool,
    output: Output,
) -> Result<Report> {
    let mut report = Report::default();
    let source = input.source.as_slice();

    for result in Lexer::with_config(source, config) {
        match result {
            Ok(token) => {
                if output.quiet || (skip_comments && token.kind.is_comment()) {
                    continue;
                }
                let text = String::from_utf8_lossy(token.span.slice(source));
                report.lines.push(if output.json {
                    to_json(&LexRecord::Token {
                        file: &input.name,
                        token,
                        text,
                    })?
                } else {
                    format!("{:?} {} {:?}", token.kind, token.span, text)
                });
            }
            Err(error) => {
                report.failed = true;
                let text = String::from_utf8_lossy(error.span.slice(source));
                report.lines.push(if output.json {
                    to_json(&LexRecord::Error {
                        file: &input.name,
                        error,
                        message: error.kind.message().to_string(),
                        text,
                    })?
                } else {
                    let line = format!("error: {:?} {} {:?}", error.kind, error.span, text);
                    paint_error(line, output.color)
                });
            }
        }
    }

    debug!(input = %input.name, failed = report.failed, "lexed");
    Ok(report)
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ParseRecord<'a> {
    Tree {
        file: &'a str,
        tree: String,
        nodes: usize,
    },
    Error {
        file: &'a str,
        error: ParseError,
        message: String,
        text: Cow<'a, str>,
    },
}

/// Parses one input as a single expression.
pub fn parse_input(input: &Input, config: LexerConfig, output: Output) -> Result<Report> {
    let mut report = Report::default();
    let source = input.source.as_slice();

    match parse_with_config(source, config) {
        Ok(parsed) => {
            if !output.quiet {
                let tree = parsed.ast.display(parsed.root).to_string();
                report.lines.push(if output.json {
                    to_json(&ParseRecord::Tree {
                        file: &input.name,
                        tree,
                        nodes: parsed.ast.len(),
                    })?
                } else {
                    tree
                });
            }
        }
        Err(error) => {
            report.failed = true;
            let text = String::from_utf8_lossy(error.span.slice(source));
            report.lines.push(if output.json {
                to_json(&ParseRecord::Error {
                    file: &input.name,
                    error,
                    message: error.to_string(),
                    text,
                })?
            } else {
                let mut line = format!("error: {error}");
                if !text.is_empty() {
                    line.push_str(&format!(" {text:?}"));
                }
                paint_error(line, output.color)
            });
        }
    }

    debug!(input = %input.name, failed = report.failed, "parsed");
    Ok(report)
}

fn paint_error(line: String, color: bool) -> String {
    if color {
        line.red().to_string()
    } else {
        line
    }
}

fn to_json<T: Serialize>(record: &T) -> Result<String> {
    serde_json::to_string(record).context("failed to encode JSON record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input(text: &str) -> Input {
        input_named("<test>", text)
    }

    const PLAIN: Output = Output {
        json: false,
        color: false,
        quiet: false,
    };

    #[test]
    fn test_lex_lines() {
        let report = lex_input(&input("def x 0x1F"), LexerConfig::default(), false, PLAIN).unwrap();
        assert!(!report.failed);
        assert_eq!(
            report.lines,
            [
                "Keyword(Def) [0, 3) \"def\"",
                "Identifier [4, 5) \"x\"",
                "HexadecimalLiteral [6, 10) \"0x1F\"",
                "EndOfFile [10, 10) \"\"",
            ]
        );
    }

    #[test]
    fn test_lex_continues_past_errors() {
        let report = lex_input(&input("0.. a"), LexerConfig::default(), false, PLAIN).unwrap();
        assert!(report.failed);
        assert_eq!(
            report.lines,
            [
                "error: MultipleDotsInFloatingPointLiteral [0, 3) \"0..\"",
                "Identifier [4, 5) \"a\"",
                "EndOfFile [5, 5) \"\"",
            ]
        );
    }

    #[test]
    fn test_lex_skip_comments_and_quiet() {
        let report = lex_input(&input("a // c"), LexerConfig::default(), true, PLAIN).unwrap();
        assert_eq!(report.lines.len(), 2);

        let quiet = Output { quiet: true, ..PLAIN };
        let report = lex_input(&input("a $ b"), LexerConfig::default(), false, quiet).unwrap();
        assert_eq!(report.lines, ["error: UnexpectedSymbol [2, 3) \"$\""]);
    }

    #[test]
    fn test_lex_no_octal() {
        let report = lex_input(&input("01"), LexerConfig::without_octal(), false, PLAIN).unwrap();
        assert!(report.failed);
        assert!(report.lines[0].starts_with("error: LeadingZeroInDecimalLiteral"));
    }

    #[test]
    fn test_lex_json() {
        let json = Output { json: true, ..PLAIN };
        let report = lex_input(&input("1"), LexerConfig::default(), false, json).unwrap();
        let first: serde_json::Value = serde_json::from_str(&report.lines[0]).unwrap();
        assert_eq!(first["type"], "token");
        assert_eq!(first["file"], "<test>");
        assert_eq!(first["token"]["kind"], "DecimalLiteral");
        assert_eq!(first["token"]["span"]["end"], 1);
        assert_eq!(first["text"], "1");
    }

    #[test]
    fn test_parse_lines() {
        let report = parse_input(&input("1 - 2 - 3"), LexerConfig::default(), PLAIN).unwrap();
        assert!(!report.failed);
        assert_eq!(report.lines, ["(- 1 (- 2 3))"]);

        let report = parse_input(&input("1 * 2"), LexerConfig::default(), PLAIN).unwrap();
        assert!(report.failed);
        assert_eq!(report.lines, ["error: unexpected `*` at [2, 3) \"*\""]);
    }

    #[test]
    fn test_parse_json_error() {
        let json = Output { json: true, ..PLAIN };
        let report = parse_input(&input("+"), LexerConfig::default(), json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.lines[0]).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["error"]["kind"], "UnexpectedToken");
        assert_eq!(value["error"]["found"]["Token"], "Plus");
    }

    #[test]
    fn test_read_inputs_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1 + 2").unwrap();

        let args = InputArgs {
            files: vec![file.path().to_path_buf()],
            eval: vec!["3".to_string()],
            ..Default::default()
        };
        let inputs = read_inputs(&args).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], input_named("<expr>", "3"));
        assert_eq!(inputs[1].source, b"1 + 2");
    }

    #[test]
    fn test_read_inputs_missing_file() {
        let args = InputArgs {
            files: vec!["/nonexistent/kaleidoscope/input.ks".into()],
            ..Default::default()
        };
        let err = read_inputs(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_map_inputs_keeps_order() {
        let inputs: Vec<Input> = (0..64).map(|i| input(&i.to_string())).collect();
        let reports =
            map_inputs(&inputs, |i| parse_input(i, LexerConfig::default(), PLAIN)).unwrap();
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.lines, [i.to_string()]);
        }
    }

    #[test]
    fn test_read_inputs_keeps_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a \xff b").unwrap();

        let args = InputArgs {
            files: vec![file.path().to_path_buf()],
            ..Default::default()
        };
        let inputs = read_inputs(&args).unwrap();
        assert_eq!(inputs[0].source, b"a \xff b");

        let report = lex_input(&inputs[0], LexerConfig::default(), false, PLAIN).unwrap();
        assert!(report.failed);
        assert_eq!(
            report.lines,
            [
                "Identifier [0, 1) \"a\"",
                "error: UnexpectedSymbol [2, 3) \"\u{FFFD}\"",
                "Identifier [4, 5) \"b\"",
                "EndOfFile [5, 5) \"\"",
            ]
        );
    }

    fn input_named(name: &str, text: &str) -> Input {
        Input {
            name: name.to_string(),
            source: text.as_bytes().to_vec(),
        }
    }
}
