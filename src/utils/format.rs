/// Format a price in the reference currency: zero decimal places with
/// thousands separators, e.g. `64000.4` -> `"$64,000"`.
pub fn format_usd(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let grouped = group_thousands(&rounded);
    if amount.is_sign_negative() && rounded != "0" {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a percentage with two decimal places, e.g. `3.14159` -> `"3.14%"`.
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Uppercase the first character of a coin identifier for display.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Insert a comma every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
