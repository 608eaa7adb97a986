use anyhow::{Context, Result};
use console::style;
use formflow_core::{FieldController, FormSession, TransitionLog};
use formflow_validation::{FieldValue, FormValues};
use std::path::Path;

/// Read a JSON object of field values, e.g. `{"firstName": "Olena", "terms": true}`
pub fn load_values(path: &Path) -> Result<FormValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let values: FormValues = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of field values", path.display()))?;
    Ok(values)
}

/// Feed every value through the controller the way a user would type it
pub fn enter_values(form: &mut FieldController, values: &FormValues) -> Result<()> {
    for (field, value) in values.iter() {
        form.on_change(field, value.clone())
            .with_context(|| format!("Cannot set '{}'", field))?;
        form.on_blur(field)?;
    }
    Ok(())
}

/// Same as [`enter_values`], through a session
pub fn enter_session_values(session: &mut FormSession, values: &FormValues) -> Result<()> {
    for (field, value) in values.iter() {
        session
            .on_change(field, value.clone())
            .with_context(|| format!("Cannot set '{}'", field))?;
        session.on_blur(field)?;
    }
    Ok(())
}

/// Display form of a value; passwords are masked
pub fn display_value(field: &str, value: &FieldValue) -> String {
    let text = value.to_string();
    if field.to_lowercase().contains("password") && !text.is_empty() {
        "*".repeat(text.chars().count())
    } else {
        text
    }
}

pub fn print_field(field: &str, value: &FieldValue, error: Option<&str>) {
    let shown = display_value(field, value);
    match error {
        Some(message) => println!(
            "{} {:<16} {:<28} {}",
            style("✗").red(),
            field,
            shown,
            style(message).red()
        ),
        None => println!("{} {:<16} {}", style("✓").green(), field, shown),
    }
}

pub fn print_session_fields(session: &FormSession) {
    for view in session.field_views() {
        print_field(&view.field, &view.value, view.error.as_deref());
    }
}

pub fn print_transitions(log: &TransitionLog) {
    for transition in log.entries() {
        println!(
            "  {} → {} ({:?}) at {}",
            transition.from,
            style(transition.to).cyan(),
            transition.trigger,
            transition.at.format("%H:%M:%S%.3f")
        );
    }
}
