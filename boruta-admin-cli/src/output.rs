//! Output formatting utilities

use boruta_admin_core::{FieldErrors, UserEntity};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde_json::{json, Value as JsonValue};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print structured field errors, one line per field
pub fn field_errors(errors: &FieldErrors) {
    for (field, _) in errors.iter() {
        eprintln!("  {} {}", format!("{}:", field).red(), errors.messages(field).join(", "));
    }
}

/// JSON view of a user for `--json` output
pub fn user_json(user: &UserEntity) -> JsonValue {
    let scopes: Vec<JsonValue> = user
        .authorized_scopes
        .iter()
        .map(|scope| scope.model.serialized())
        .collect();

    json!({
        "id": user.id,
        "email": user.email,
        "authorized_scopes": scopes,
        "errors": user.errors,
    })
}

/// Print a single user as a key-value table followed by its scopes
pub fn print_user(user: &UserEntity) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID".to_string(), display_id(user)]);
    table.add_row(vec![
        "Email".to_string(),
        user.email.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Authorized scopes".to_string(),
        user.authorized_scopes.len().to_string(),
    ]);
    println!("{}", table);

    if user.authorized_scopes.is_empty() {
        return;
    }

    let mut scopes = create_table();
    scopes.set_header(vec!["Scope ID", "Name", "Label", "Public"]);
    for scope in &user.authorized_scopes {
        let scope = &scope.model;
        scopes.add_row(vec![
            scope.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            scope.name.clone().unwrap_or_else(|| "-".to_string()),
            scope.label.clone().unwrap_or_else(|| "-".to_string()),
            if scope.public { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", scopes);
}

pub fn display_id(user: &UserEntity) -> String {
    user.id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}
