use std::path::PathBuf;

use slate_lib::ConfigElement;

use super::source_loader::load_source;
use super::{fail, fail_msg};

pub struct FmtArgs {
    pub file: PathBuf,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: FmtArgs) {
    let loaded = load_source(&args.file).unwrap_or_else(|msg| fail_msg(&msg));
    let source = loaded.source();

    let root = ConfigElement::from_source(&source).unwrap_or_else(|err| fail(&err, &source, args.color));

    let out = root.printer().compact(args.compact).dump();
    if args.compact && !out.is_empty() {
        println!("{}", out);
    } else {
        print!("{}", out);
    }
}
