use std::fs;
use std::io::{self, Read};
use std::path::Path;

use slate_lib::Source;

/// File contents plus the name errors are reported under.
#[derive(Debug)]
pub struct LoadedSource {
    name: String,
    text: String,
}

impl LoadedSource {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Source<'_> {
        Source::new(&self.name, &self.text)
    }
}

/// Reads `path`, or stdin when it is `-`.
pub fn load_source(path: &Path) -> Result<LoadedSource, String> {
    let loaded = if path.as_os_str() == "-" {
        load_stdin()?
    } else {
        load_file(path)?
    };
    tracing::debug!(name = %loaded.name, bytes = loaded.text.len(), "source loaded");
    Ok(loaded)
}

fn load_stdin() -> Result<LoadedSource, String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(LoadedSource {
        name: "<stdin>".to_string(),
        text,
    })
}

fn load_file(path: &Path) -> Result<LoadedSource, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(LoadedSource {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}
