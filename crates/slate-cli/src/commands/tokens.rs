use std::fmt::Write;
use std::path::PathBuf;

use slate_core::Colors;
use slate_lib::{Error, Source, TokenKind};
use slate_lib::parser::tokenize;

use super::source_loader::load_source;
use super::{fail, fail_msg};

pub struct TokensArgs {
    pub file: PathBuf,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: TokensArgs) {
    let loaded = load_source(&args.file).unwrap_or_else(|msg| fail_msg(&msg));
    let source = loaded.source();

    match render_tokens(&source, args.spans, Colors::new(args.color)) {
        Ok(out) => print!("{}", out),
        Err(err) => fail(&err, &source, args.color),
    }
}

/// One token per line: kind, quoted text for strings, byte range with `spans`.
pub fn render_tokens(source: &Source<'_>, spans: bool, c: Colors) -> Result<String, Error> {
    let mut out = String::new();
    for token in tokenize(source)? {
        write!(out, "{}{}{}", c.kind, token.kind, c.reset).expect("String write never fails");
        if let TokenKind::EscapedString(text) | TokenKind::RawString(text) = token.kind {
            write!(out, " {}{:?}{}", c.text, text, c.reset).expect("String write never fails");
        }
        if spans {
            write!(
                out,
                " {}[{}..{}]{}",
                c.span,
                token.span.start(),
                token.span.end(),
                c.reset
            )
            .expect("String write never fails");
        }
        out.push('\n');
    }
    Ok(out)
}
