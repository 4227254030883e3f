use crate::view::format_currency;

/// **VALUE**: Verifies the totals line matches what users expect to read.
///
/// **BUG THIS CATCHES**: Would catch "$450.00" for whole amounts or lost cents.
#[test]
fn given_amounts_when_formatted_then_whole_amounts_drop_cents() {
    assert_eq!(format_currency(450.0), "$450");
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(12.5), "$12.50");
    assert_eq!(format_currency(1234.567), "$1234.57");
}

/// **VALUE**: Verifies negative totals keep the sign in front of the symbol.
#[test]
fn given_negative_amount_when_formatted_then_sign_precedes_dollar() {
    assert_eq!(format_currency(-20.0), "-$20");
    assert_eq!(format_currency(-3.25), "-$3.25");
}
