/// Format a count with thousands separators (`1234` → `"1,234"`).
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string(), ',')
}

/// Format a monetary amount in Indonesian Rupiah, `id_ID` style.
///
/// `.` groups thousands, `,` separates two fraction digits, and the `Rp`
/// symbol is followed by a space.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_rupiah;
///
/// assert_eq!(format_rupiah(1234567.89), "Rp 1.234.567,89");
/// assert_eq!(format_rupiah(0.0),        "Rp 0,00");
/// assert_eq!(format_rupiah(-50.5),      "-Rp 50,50");
/// ```
pub fn format_rupiah(amount: f64) -> String {
    let (int_digits, frac_digits) = fixed_parts(amount.abs(), 2);
    let body = format!("Rp {},{}", group_thousands(&int_digits, '.'), frac_digits);
    if amount < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a review score with two decimals, or `"n/a"` when undefined.
///
/// ```
/// use dashboard_core::formatting::format_review;
///
/// assert_eq!(format_review(Some(4.0867)), "4.09");
/// assert_eq!(format_review(None), "n/a");
/// ```
pub fn format_review(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.2}", s),
        None => "n/a".to_string(),
    }
}

/// Short magnitude label for chart bars (`1_300_000.0` → `"1.3M"`).
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(1500.0), "1.5K");
/// assert_eq!(format_compact(1_300_000.0), "1.3M");
/// assert_eq!(format_compact(2_000_000_000.0), "2.0B");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{}{:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}{:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}{:.1}K", sign, abs / 1e3)
    } else {
        format!("{}{:.0}", sign, abs)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Round `abs_value` to `decimals` places and split into integer and
/// fraction digit strings. The fraction is empty when `decimals == 0`.
fn fixed_parts(abs_value: f64, decimals: u32) -> (String, String) {
    // Nudge by a tiny epsilon at the target precision so exact binary
    // midpoints like 1.005 round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let text = format!("{:.prec$}", rounded, prec = decimals as usize);
    match text.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.to_string()),
        None => (text, String::new()),
    }
}

/// Insert `sep` every three digits from the right of an integer string.
fn group_thousands(s: &str, sep: char) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
