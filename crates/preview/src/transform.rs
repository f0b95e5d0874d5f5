use crate::config::WeightConfig;
use std::fmt;

/// Value rewrite applied between reading a source and writing its preview.
#[derive(Clone, Copy)]
pub enum Transform {
    /// Line breaks become `<br>`; meant for markup targets.
    NewlinesToBreaks,
    /// Kilograms rendered as `"{kg} kg / {lbs} lbs"`.
    WeightKg,
    Custom(fn(&str) -> String),
}

impl Transform {
    pub fn apply(&self, raw: &str, weight: &WeightConfig) -> String {
        match self {
            Transform::NewlinesToBreaks => newlines_to_breaks(raw),
            Transform::WeightKg => format_weight(raw, weight),
            Transform::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::NewlinesToBreaks => f.write_str("NewlinesToBreaks"),
            Transform::WeightKg => f.write_str("WeightKg"),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

pub fn newlines_to_breaks(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\n', "<br>")
}

pub fn format_weight(raw: &str, cfg: &WeightConfig) -> String {
    match parse_leading_number(raw) {
        Some(kg) if kg > 0.0 && kg.is_finite() => {
            let lbs = kg * cfg.kg_to_lbs;
            format!("{kg} kg / {lbs:.prec$} lbs", prec = cfg.decimals)
        }
        _ => cfg.unavailable_text.clone(),
    }
}

/// Longest numeric prefix after leading whitespace, the way form fields read numbers
/// (`"4.5kg"` is 4.5, `"abc"` is nothing).
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let b = s.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;
    if b.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    s[..i].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(raw: &str) -> String {
        format_weight(raw, &WeightConfig::default())
    }

    #[test]
    fn formats_positive_weights() {
        assert_eq!(weight("4.5"), "4.5 kg / 9.9 lbs");
        assert_eq!(weight("10"), "10 kg / 22.0 lbs");
        assert_eq!(weight(" 3.20 "), "3.2 kg / 7.1 lbs");
        assert_eq!(weight("2kg"), "2 kg / 4.4 lbs");
    }

    #[test]
    fn non_positive_or_unparsable_is_unavailable() {
        for raw in ["", "abc", "0", "-3", ".", "kg 4"] {
            assert_eq!(weight(raw), "Weight: N/A", "{raw:?}");
        }
    }

    #[test]
    fn leading_number_prefixes() {
        assert_eq!(parse_leading_number("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(newlines_to_breaks("Great pup!\nWould adopt again"), "Great pup!<br>Would adopt again");
        assert_eq!(newlines_to_breaks("a\r\nb"), "a<br>b");
        let t = Transform::Custom(|s| s.to_uppercase());
        assert_eq!(t.apply("rex", &WeightConfig::default()), "REX");
    }
}
