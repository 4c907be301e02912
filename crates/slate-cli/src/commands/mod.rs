pub mod check;
pub mod fmt;
pub mod source_loader;
pub mod tokens;


use slate_lib::{Error, ErrorPrinter, Source};

/// Prints `error` to stderr and exits with status 1.
pub fn fail(error: &Error, source: &Source<'_>, color: bool) -> ! {
    eprintln!(
        "{}",
        ErrorPrinter::new(error).source(source).colored(color).render()
    );
    std::process::exit(1);
}

/// Reports a plain message to stderr and exits with status 1.
pub fn fail_msg(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
