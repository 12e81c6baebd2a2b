//! Presentation formatting for monetary and percentage values
//!
//! Amounts are rendered for the pt-PT locale: space-grouped thousands,
//! comma decimals, trailing euro sign. A display concern only; wire values
//! stay plain decimals.

use chrono::NaiveDateTime;

/// Format an amount as pt-PT EUR, e.g. `1 234,56 €`.
pub fn format_eur(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!(
        "{}{},{:02} €",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}

/// Format a profit percentage with its sign, e.g. `+2,50%` / `-1,00%`.
pub fn format_pct(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "-" };
    let value = format!("{:.2}", pct.abs()).replace('.', ",");
    format!("{}{}%", sign, value)
}

/// Format a backend timestamp as a pt date, e.g. `20/03/2024`. Falls back
/// to the raw string when the timestamp does not parse.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('Z');
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
