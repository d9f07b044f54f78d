use std::path::Path;

use regex::Regex;

use crate::error::{Result, UtlaggError};
use crate::models::LineItem;

/// Decode convention-named form fields into line items.
///
/// The form names its controls `"<row>:amount"`, `"<row>:account"`,
/// `"<row>:description"`. The amount fields are the authoritative row set:
/// a row exists iff its amount field does, and missing sibling fields read
/// as empty. Rows come back sorted by index.
pub fn parse_fields(fields: &[(String, String)]) -> Vec<LineItem> {
    let amount_re = Regex::new(r"^(\d+):amount$").unwrap();

    let lookup = |name: &str| -> &str {
        fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    };

    let mut items: Vec<LineItem> = fields
        .iter()
        .filter_map(|(name, amount)| {
            let caps = amount_re.captures(name)?;
            let row: u32 = caps[1].parse().ok()?;
            Some(LineItem::new(
                row,
                amount,
                lookup(&format!("{row}:account")),
                lookup(&format!("{row}:description")),
            ))
        })
        .collect();

    items.sort_by_key(|item| item.row);
    items
}

/// Re-encode line items into the convention naming, for the submission
/// payload.
pub fn to_fields(items: &[LineItem]) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(items.len() * 3);
    for item in items {
        let row = item.row;
        fields.push((format!("{row}:amount"), item.amount.clone()));
        fields.push((format!("{row}:account"), item.account.clone()));
        fields.push((format!("{row}:description"), item.description.clone()));
    }
    fields
}

/// Load a serialized form payload: a JSON object mapping field name to
/// value. Numbers are accepted and stringified, anything else is rejected.
pub fn read_form(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let object = value
        .as_object()
        .ok_or_else(|| UtlaggError::BadForm("payload is not a JSON object".to_string()))?;

    let mut fields = Vec::with_capacity(object.len());
    for (name, value) in object {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(UtlaggError::BadForm(format!(
                    "field {name:?} has non-scalar value {other}"
                )))
            }
        };
        fields.push((name.clone(), value));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_single_row() {
        let items = parse_fields(&fields(&[
            ("0:amount", "20.00"),
            ("0:account", "Food"),
            ("0:description", "lunch"),
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], LineItem::new(0, "20.00", "Food", "lunch"));
    }

    #[test]
    fn test_amount_fields_are_the_row_set() {
        // An account without a matching amount is not a row.
        let items = parse_fields(&fields(&[
            ("0:amount", "10"),
            ("7:account", "Orphan"),
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].row, 0);
    }

    #[test]
    fn test_missing_siblings_read_as_empty() {
        let items = parse_fields(&fields(&[("3:amount", "5")]));
        assert_eq!(items[0].account, "");
        assert_eq!(items[0].description, "");
    }

    #[test]
    fn test_rows_sorted_by_index() {
        let items = parse_fields(&fields(&[
            ("10:amount", "1"),
            ("2:amount", "2"),
            ("0:amount", "3"),
        ]));
        let rows: Vec<u32> = items.iter().map(|i| i.row).collect();
        assert_eq!(rows, vec![0, 2, 10]);
    }

    #[test]
    fn test_unrelated_fields_ignored() {
        let items = parse_fields(&fields(&[
            ("recipient_account", "1234-5678"),
            ("amount", "99"),
            ("x:amount", "99"),
            ("0:amount", "1"),
        ]));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_to_fields_round_trip() {
        let original = vec![
            LineItem::new(0, "20.00", "Food", "lunch"),
            LineItem::new(1, "", "", ""),
        ];
        let items = parse_fields(&to_fields(&original));
        assert_eq!(items, original);
    }

    #[test]
    fn test_read_form_accepts_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"0:amount": 20.5, "0:account": "Food"}"#).unwrap();
        let parsed = read_form(&path).unwrap();
        assert!(parsed.contains(&("0:amount".to_string(), "20.5".to_string())));
    }

    #[test]
    fn test_read_form_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(read_form(&path).is_err());
    }

    #[test]
    fn test_read_form_rejects_nested_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"0:amount": ["20"]}"#).unwrap();
        assert!(read_form(&path).is_err());
    }
}
