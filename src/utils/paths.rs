//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and drop a leading "./"
    let forward = path.replace('\\', "/");
    match forward.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => forward,
    }
}

/// Join the components of `rel` with `/`, whatever the host separator.
pub fn to_forward_slashes(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when any component other than `.`/`..` starts with a dot.
pub fn is_hidden_path(rel_path: &str) -> bool {
    normalize_path(rel_path)
        .split('/')
        .any(|c| c.starts_with('.') && c != "." && c != "..")
}
