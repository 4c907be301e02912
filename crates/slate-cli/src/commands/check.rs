use std::path::PathBuf;

use slate_lib::ConfigElement;

use super::source_loader::load_source;
use super::{fail, fail_msg};

pub struct CheckArgs {
    pub file: PathBuf,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let loaded = load_source(&args.file).unwrap_or_else(|msg| fail_msg(&msg));
    let source = loaded.source();

    if let Err(err) = ConfigElement::from_source(&source) {
        fail(&err, &source, args.color);
    }

    // Silent on success (like cargo check)
}
