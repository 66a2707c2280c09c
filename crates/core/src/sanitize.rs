use std::path::is_separator;

/// Keeps a rendered template inside one path component. Only separators and
/// NUL are replaced; anything else the platform accepts is left as rendered.
pub fn sanitize_filename(value: &str) -> String {
    let out: String = value
        .chars()
        .map(|ch| if is_separator(ch) || ch == '\0' { '_' } else { ch })
        .collect();

    match out.as_str() {
        "" | "." | ".." => "untitled".to_string(),
        _ => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("2019/05/04.jpg"), "2019_05_04.jpg");
        assert_eq!(sanitize_filename("a\0b.jpg"), "a_b.jpg");
    }

    #[cfg(unix)]
    #[test]
    fn sanitize_leaves_names_the_platform_accepts() {
        for name in ["10:20:30.jpg", "photo.", "con.jpg", "AUX", " lead", "what?.jpg"] {
            assert_eq!(sanitize_filename(name), name);
        }
    }

    #[test]
    fn sanitize_never_returns_dot_names() {
        assert_eq!(sanitize_filename(""), "untitled");
        assert_eq!(sanitize_filename("."), "untitled");
        assert_eq!(sanitize_filename(".."), "untitled");
        assert_eq!(sanitize_filename("..."), "...");
    }

    #[test]
    fn sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("beach (2).jpg"), "beach (2).jpg");
    }
}
