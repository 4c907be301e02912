//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::fmt::FmtArgs;
use crate::commands::tokens::TokensArgs;

pub struct TokensParams {
    pub file: PathBuf,
    pub spans: bool,
    pub color: ColorChoice,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: file_path(m),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            file: p.file,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct FmtParams {
    pub file: PathBuf,
    pub compact: bool,
    pub color: ColorChoice,
}

impl FmtParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: file_path(m),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<FmtParams> for FmtArgs {
    fn from(p: FmtParams) -> Self {
        Self {
            file: p.file,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub file: PathBuf,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: file_path(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            file: p.file,
            color: p.color.should_colorize(),
        }
    }
}

fn file_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("file")
        .cloned()
        .unwrap_or_else(|| unreachable!("clap requires FILE"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
