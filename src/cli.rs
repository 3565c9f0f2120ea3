// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for kaleidoscope.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// kaleidoscope - Lex and parse Kaleidoscope expressions
#[derive(Parser, Debug)]
#[command(name = "kaleidoscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (only report problems)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every token and lexical error
    #[command(alias = "l")]
    Lex(LexArgs),

    /// Parse one expression per input and print its tree
    #[command(alias = "p")]
    Parse(ParseArgs),
}

/// Where the source text comes from.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Source files to read; `-` reads standard input
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Source text given inline (may be repeated)
    #[arg(short, long = "eval", value_name = "EXPR")]
    pub eval: Vec<String>,

    /// Treat `0` followed by digits as an error instead of an octal literal
    #[arg(long)]
    pub no_octal: bool,

    /// Emit one JSON object per line instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct LexArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Leave comment tokens out of the listing
    #[arg(long)]
    pub skip_comments: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_lex_args() {
        let cli = Cli::try_parse_from(["kaleidoscope", "lex", "a.ks", "-", "--no-octal", "--json"])
            .unwrap();
        let Commands::Lex(args) = cli.command else {
            panic!("expected lex");
        };
        assert_eq!(args.input.files, [PathBuf::from("a.ks"), PathBuf::from("-")]);
        assert!(args.input.no_octal);
        assert!(args.input.json);
        assert!(!args.skip_comments);
    }

    #[test]
    fn test_parse_args_with_eval() {
        let cli = Cli::try_parse_from(["kaleidoscope", "-v", "parse", "-e", "1 + 2", "-e", "3"])
            .unwrap();
        assert!(cli.verbose);
        let Commands::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert_eq!(args.input.eval, ["1 + 2", "3"]);
        assert!(args.input.files.is_empty());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kaleidoscope", "-v", "-q", "lex"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["kaleidoscope"]).is_err());
    }
}
