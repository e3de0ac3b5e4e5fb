//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! points at the directory Zellij was started from (usually `$HOME`).

use std::path::PathBuf;

/// Plugin data directory, holding the trace file.
///
/// ```
/// use shlichus_board::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str().unwrap(),
///     "/host/.local/share/zellij/shlichus-board"
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("shlichus-board")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// Used for user-supplied paths such as `theme_file`.
///
/// ```
/// use shlichus_board::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/board.toml"), "/host/themes/board.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_as_prefix() {
        assert_eq!(expand_tilde("~user/x"), "~user/x");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }
}
