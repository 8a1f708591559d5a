//! Path-string helpers for the UI layer.
//!
//! These operate on display strings, not `Path`s: the webview host joins
//! with forward slashes on every platform, and image URLs need the Windows
//! drive prefix rewritten into the host's `\c\...` display form.

/// Join a directory onto a base path with a forward slash. An empty base
/// passes the directory through unchanged.
pub fn join_path(path: &str, dir: &str) -> String {
    if path.is_empty() {
        return dir.to_string();
    }
    format!("{path}/{dir}")
}

/// Join a directory onto a base path in the form the image view consumes.
///
/// Windows absolute paths (`C:\...`) are rewritten to `\C...\dir`; anything
/// else joins with a forward slash.
pub fn join_show_img_path(path: &str, dir: &str) -> String {
    if path.is_empty() {
        return dir.to_string();
    }

    if has_drive_prefix(path) {
        let drive = &path[..1];
        let rest = &path[2..];
        return format!("\\{drive}{rest}\\{dir}");
    }

    format!("{path}/{dir}")
}

/// `X:\` at the start of the string.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_uses_forward_slash() {
        assert_eq!(join_path("/memes", "cats"), "/memes/cats");
        assert_eq!(join_path("", "cats"), "cats");
    }

    #[test]
    fn show_img_path_rewrites_windows_drives() {
        assert_eq!(
            join_show_img_path("C:\\memes\\cats", "a.png"),
            "\\C\\memes\\cats\\a.png"
        );
        assert_eq!(join_show_img_path("c:\\m", "b.gif"), "\\c\\m\\b.gif");
    }

    #[test]
    fn show_img_path_joins_unix_paths() {
        assert_eq!(join_show_img_path("/memes/cats", "a.png"), "/memes/cats/a.png");
        assert_eq!(join_show_img_path("", "a.png"), "a.png");
        // A lone drive letter without a separator is not a drive path.
        assert_eq!(join_show_img_path("C:", "a.png"), "C:/a.png");
    }
}
