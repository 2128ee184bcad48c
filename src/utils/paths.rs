use std::env;
use std::path::Path;

/// Formats a path with `~` substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use session_explorer::utils::format_path_with_tilde;
///
/// // Returns "~/Documents" if HOME=/Users/alice
/// let formatted = format_path_with_tilde("/Users/alice/Documents");
/// ```
pub fn format_path_with_tilde(path: &str) -> String {
    let home = env::var("HOME").ok();
    format_path_with_tilde_internal(path, home.as_deref())
}

/// Internal helper for path formatting with an explicit home (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.map(|h| h.trim_end_matches('/')).filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    // Only substitute on a component boundary: /home/al must not match /home/alice
    match Path::new(path).strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.to_string(),
    }
}
