use crate::error::Result;
use crate::form::parse_fields;
use crate::settings::load_settings;
use crate::validator::snapshot;

pub const DEMO_FILE: &str = "utlagg-demo.json";

/// Sample payload in the form's wire naming: two complete rows, one row
/// with a typo'd amount, and one untouched row.
const DEMO_FORM: &[(&str, &str)] = &[
    ("0:amount", "245.00"),
    ("0:account", "5810"),
    ("0:description", "Train tickets, board meeting"),
    ("1:amount", "89.50"),
    ("1:account", "6071"),
    ("1:description", "Team lunch"),
    ("2:amount", "12,40"),
    ("2:account", "6110"),
    ("2:description", "Stamps"),
    ("3:amount", ""),
    ("3:account", ""),
    ("3:description", ""),
    ("recipient_account", "1234-5678901"),
];

pub fn run() -> Result<()> {
    let mut object = serde_json::Map::new();
    for (name, value) in DEMO_FORM {
        object.insert(name.to_string(), serde_json::Value::String(value.to_string()));
    }
    let json = serde_json::to_string_pretty(&serde_json::Value::Object(object))?;
    std::fs::write(DEMO_FILE, format!("{json}\n"))?;
    println!("Wrote {DEMO_FILE}");
    println!();

    let fields: Vec<(String, String)> = DEMO_FORM
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
    let items = parse_fields(&fields);
    let snap = snapshot(&items, &load_settings().policy());
    super::check::print_snapshot(&items, &snap);

    println!();
    println!("Note row 2: \"12,40\" does not parse, so it contributes 0.00.");
    println!("Edit {DEMO_FILE} and re-run `utlagg check {DEMO_FILE}`.");
    Ok(())
}
