//! Currency text handling for integer-peso amounts.
//!
//! Amounts are stored as plain numbers; only the edit and display surfaces
//! hold formatted text. Parsing accepts whatever a user may type into an
//! amount field (grouping dots, a decimal comma, a stray symbol) and always
//! comes back with a finite number.

/// Separator and symbol preferences for rendered amounts.
///
/// The default matches the es-CL conventions the persisted documents were
/// written with: `$` prefix and `.` thousands grouping.
#[derive(Debug, Clone)]
pub struct CurrencyStyle {
    pub symbol: char,
    pub grouping: char,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            symbol: '$',
            grouping: '.',
        }
    }
}

/// Parses user-entered currency text into a number. Never fails.
///
/// Everything but digits, dots, and commas is stripped first. A comma, if
/// present, is the decimal separator and every dot is grouping. With dots
/// only, a single dot splitting a short head (≤ 3 digits) from a short tail
/// (≤ 2 digits) reads as a decimal point; any other dot layout is grouping.
pub fn parse(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else if cleaned.contains('.') {
        let parts: Vec<&str> = cleaned.split('.').collect();
        if parts.len() == 2 && parts[1].len() <= 2 && parts[0].len() <= 3 {
            cleaned
        } else {
            cleaned.replace('.', "")
        }
    } else {
        cleaned
    };

    leading_float(&normalized)
}

/// Reads the longest valid float prefix, `parseFloat`-style, so leftover
/// separators after normalization degrade the value instead of erroring.
fn leading_float(text: &str) -> f64 {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in text.char_indices() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }
    text[..end].parse::<f64>().unwrap_or(0.0)
}

/// Renders an amount for read-only display: symbol prefix, grouped digits,
/// rounded to whole units. Non-finite input renders as the canonical zero.
pub fn format_display(style: &CurrencyStyle, value: f64) -> String {
    if !value.is_finite() {
        return format!("{}0", style.symbol);
    }
    let rounded = value.round();
    if rounded == 0.0 {
        return format!("{}0", style.symbol);
    }
    let grouped = group_digits(&format!("{:.0}", rounded.abs()), style.grouping);
    if rounded < 0.0 {
        format!("-{}{}", style.symbol, grouped)
    } else {
        format!("{}{}", style.symbol, grouped)
    }
}

/// Renders an amount for an input field: grouped digits, no symbol, and an
/// empty string for zero so a blank field stays blank rather than showing 0.
pub fn format_for_edit(style: &CurrencyStyle, value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = value.round();
    if rounded == 0.0 {
        return String::new();
    }
    let grouped = group_digits(&format!("{:.0}", rounded.abs()), style.grouping);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Re-derives an input field's text after a keystroke and shifts the cursor
/// by the length delta, clamped to the new text.
///
/// Offsets are byte positions; rendered text is ASCII. The caller applies
/// the returned cursor once the new text is in place.
pub fn reformat_live(style: &CurrencyStyle, text: &str, cursor: usize) -> (String, usize) {
    if text.is_empty() {
        return (String::new(), 0);
    }
    let formatted = format_for_edit(style, parse(text));
    if formatted == text {
        return (formatted, cursor.min(text.len()));
    }
    let delta = formatted.len() as isize - text.len() as isize;
    let shifted = (cursor as isize + delta).clamp(0, formatted.len() as isize);
    (formatted, shifted as usize)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
