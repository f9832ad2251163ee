/// Format a meeting count with thousands separators.
///
/// # Examples
///
/// ```
/// use meetings_core::formatting::format_count;
///
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Upper-case the first character, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use meetings_core::formatting::capitalize;
///
/// assert_eq!(capitalize("septiembre"), "Septiembre");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Horizontal bar whose length is `count / max` of `width` cells.
///
/// A non-zero count always gets at least one cell so small values stay
/// visible. Returns an empty string when `max` is zero.
///
/// # Examples
///
/// ```
/// use meetings_core::formatting::render_bar;
///
/// assert_eq!(render_bar(5, 10, 10), "█████");
/// assert_eq!(render_bar(1, 100, 10), "█");
/// assert_eq!(render_bar(0, 10, 10), "");
/// ```
pub fn render_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = (count * width / max).clamp(1, width);
    "█".repeat(cells)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use meetings_core::formatting::percentage;
///
/// assert!((percentage(1, 4, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0, 0, 2), 0.0);
/// ```
pub fn percentage(part: usize, whole: usize, decimal_places: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
