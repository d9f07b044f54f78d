/// Format a total for the display element: exactly two fractional digits.
pub fn amount(val: f64) -> String {
    // Avoid "-0.00" when contributions sum to a negative zero.
    let val = if val == 0.0 { 0.0 } else { val };
    format!("{val:.2}")
}
