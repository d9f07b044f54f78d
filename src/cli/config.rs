use crate::error::Result;
use crate::settings::{load_settings, save_settings, Settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    let names: Vec<&str> = settings
        .required_fields
        .iter()
        .map(|f| f.as_str())
        .collect();
    if names.is_empty() {
        println!("Required fields: (none — only the total gates submission)");
    } else {
        println!("Required fields: {}", names.join(", "));
    }
    Ok(())
}

pub fn require(fields: &str) -> Result<()> {
    let required_fields = super::parse_required_list(fields)?;
    save_settings(&Settings { required_fields })?;
    show()
}
