/// Render a money amount for the totals line and the amount column.
///
/// Whole amounts drop the cents (`$450`), others keep two decimals (`$12.50`).
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();

    if magnitude.fract() == 0.0 {
        format!("{sign}${magnitude:.0}")
    } else {
        format!("{sign}${magnitude:.2}")
    }
}
