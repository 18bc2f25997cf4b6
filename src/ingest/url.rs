use regex::Regex;
use std::sync::OnceLock;

/// Extracts a YouTube playlist ID from a user-supplied URL.
///
/// Patterns are probed in order: the `list=` query parameter first, then the
/// bare `/playlist/<id>` path shape some share links use. A URL without any
/// recognized marker returns `None`; the caller decides how to surface that.
#[must_use]
pub fn extract_playlist_id(url: &str) -> Option<String> {
    static QUERY: OnceLock<Regex> = OnceLock::new();
    static PATH: OnceLock<Regex> = OnceLock::new();

    let query = QUERY
        .get_or_init(|| Regex::new(r"[?&]list=([A-Za-z0-9_-]+)").expect("Invalid regex"));
    let path = PATH
        .get_or_init(|| Regex::new(r"/playlist/([A-Za-z0-9_-]+)").expect("Invalid regex"));

    for re in [query, path] {
        if let Some(caps) = re.captures(url)
            && let Some(id) = caps.get(1)
        {
            return Some(id.as_str().to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_query_param() {
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/playlist?list=PL123abc_-"),
            Some("PL123abc_-".to_string())
        );
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/watch?v=abc&list=PLxyz"),
            Some("PLxyz".to_string())
        );
    }

    #[test]
    fn test_extract_from_path() {
        assert_eq!(
            extract_playlist_id("https://youtube.com/playlist/PL456"),
            Some("PL456".to_string())
        );
    }

    #[test]
    fn test_query_param_takes_precedence() {
        assert_eq!(
            extract_playlist_id("https://youtube.com/playlist/PLpath?list=PLquery"),
            Some("PLquery".to_string())
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_playlist_id("https://www.youtube.com/watch?v=abc"), None);
        assert_eq!(extract_playlist_id("not a url"), None);
        assert_eq!(extract_playlist_id(""), None);
    }
}
