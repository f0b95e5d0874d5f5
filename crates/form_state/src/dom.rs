use html::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlType {
    /// Single-line inputs whose live state is a string (`text`, `number`, `email`, ...).
    Text,
    TextArea,
    File,
    Select,
    Other,
}

pub fn control_type(node: &Node) -> ControlType {
    let Some(name) = node.tag_name() else {
        return ControlType::Other;
    };

    if name.eq_ignore_ascii_case("textarea") {
        return ControlType::TextArea;
    }
    if name.eq_ignore_ascii_case("select") {
        return ControlType::Select;
    }
    if !name.eq_ignore_ascii_case("input") {
        return ControlType::Other;
    }

    let ty = node.attr("type").map(str::trim).filter(|s| !s.is_empty());
    match ty {
        None => ControlType::Text, // missing type defaults to text
        Some(t) if t.eq_ignore_ascii_case("file") => ControlType::File,
        Some(t)
            if ["text", "number", "email", "url", "tel", "search", "date", "hidden"]
                .iter()
                .any(|k| t.eq_ignore_ascii_case(k)) =>
        {
            ControlType::Text
        }
        _ => ControlType::Other,
    }
}

pub fn normalize_textarea_newlines(s: &str) -> String {
    // Normalize CRLF/CR to LF. (Browsers store textarea values with LF newlines.)
    if !s.contains('\r') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    out
}
