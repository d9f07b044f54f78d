use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{Result, UtlaggError};
use crate::form::{parse_fields, read_form};
use crate::models::{FormSnapshot, LineItem, SubmitState};
use crate::settings::load_settings;
use crate::validator::{snapshot, ValidationPolicy};

fn row_status(snap: &FormSnapshot, item: &LineItem) -> String {
    match snap.violations.iter().find(|v| v.row == item.row) {
        Some(violation) => {
            let names: Vec<&str> = violation.missing.iter().map(|f| f.as_str()).collect();
            format!("missing {}", names.join(", "))
        }
        None => "ok".to_string(),
    }
}

pub fn print_snapshot(items: &[LineItem], snap: &FormSnapshot) {
    let mut table = Table::new();
    table.set_header(vec!["Row", "Amount", "Account", "Description", "Status"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.row),
            Cell::new(&item.amount),
            Cell::new(&item.account),
            Cell::new(&item.description),
            Cell::new(row_status(snap, item)),
        ]);
    }
    println!("{table}");

    println!("Total:  {}", snap.total_text());
    match snap.submit {
        SubmitState::Enabled => println!("Submit: {}", "enabled".green()),
        SubmitState::Disabled => println!("Submit: {}", "disabled".red()),
    }
}

pub fn run(file: &str, require: Option<&str>, strict: bool) -> Result<()> {
    let policy = match require {
        Some(list) => ValidationPolicy::new(super::parse_required_list(list)?),
        None => load_settings().policy(),
    };

    let fields = read_form(Path::new(file))?;
    let items = parse_fields(&fields);
    let snap = snapshot(&items, &policy);

    print_snapshot(&items, &snap);

    if strict && !snap.submit.is_enabled() {
        return Err(UtlaggError::NotSubmittable);
    }
    Ok(())
}
