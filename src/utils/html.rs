use ammonia;

/// Escapes text for safe insertion into HTML, both as element content and
/// as a quoted attribute value.
///
/// Model output and form values are never trusted as markup; they are always
/// rendered as text.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}

/// Escapes text and keeps its paragraph structure by turning line breaks into `<br>`.
pub fn text_to_html(input: &str) -> String {
    input
        .lines()
        .map(escape_text)
        .collect::<Vec<_>>()
        .join("<br>")
}
