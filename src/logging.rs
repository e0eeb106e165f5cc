use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Env, Target, WriteStyle};

/// Route `log` output to a file; the terminal belongs to the UI.
/// Level comes from RUST_LOG and defaults to warn.
/// Returns false when the file cannot be opened or a logger is already set.
pub fn init(path: Option<&Path>) -> bool {
    let Some(path) = path else {
        return false;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_without_path_is_a_no_op() {
        assert!(!init(None));
    }

    #[test]
    fn init_creates_log_file_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("quotype.log");

        assert!(init(Some(&path)));
        assert!(path.exists());

        // the global logger can only be installed once
        assert!(!init(Some(&path)));
    }
}
