use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::resource_path::ResourcePath;

/// The fixed part of a version-control invocation: the executable and the
/// verb with its flags. Paths of a batch are appended at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTemplate {
    executable: PathBuf,
    args: Vec<String>,
}

impl CommandTemplate {
    /// Creates a template. `args` are inserted into the command line verbatim,
    /// so values with spaces must already be passed through [`quote_argument`].
    pub fn new(executable: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    /// Command line tokens: the quoted executable, the template arguments,
    /// then every path location quoted individually, in input order.
    pub fn tokens(&self, paths: &[ResourcePath]) -> Vec<String> {
        let mut tokens = Vec::with_capacity(1 + self.args.len() + paths.len());
        tokens.push(quote_argument(&self.executable.to_string_lossy()));
        tokens.extend(self.args.iter().cloned());
        tokens.extend(
            paths
                .iter()
                .map(|path| quote_argument(&path.location().to_string_lossy())),
        );
        tokens
    }

    /// The full shell command line for a batch.
    pub fn render(&self, paths: &[ResourcePath]) -> String {
        self.tokens(paths).join(" ")
    }
}

/// Wraps a value in double quotes for the platform shell.
///
/// On unix `"`, `\`, `$` and `` ` `` are backslash-escaped so the value
/// reaches the program unchanged. On windows only `"` is doubled: `cmd /C`
/// still expands `%VAR%` inside double quotes and has no escape for it there.
pub fn quote_argument(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if cfg!(windows) {
            if c == '"' {
                quoted.push('"');
            }
        } else if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
