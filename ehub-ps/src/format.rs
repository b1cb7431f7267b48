//! Price display formatting

/// Format an amount with two decimals and comma thousands separators
///
/// `1234567.891` → `"1,234,567.89"`.
pub fn format_etb(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{}", sign, grouped, fraction)
}
