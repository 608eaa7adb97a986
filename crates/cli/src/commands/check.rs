use crate::utils::{enter_values, load_values, print_field};
use anyhow::{bail, Result};
use console::style;
use formflow_core::{FieldController, SessionConfig, SystemClock};
use formflow_validation::registration_rules;
use std::path::Path;
use std::sync::Arc;

/// Validate a values file as a full submit attempt would see it
pub fn run(file: &Path, config: &SessionConfig, json: bool) -> Result<()> {
    let values = load_values(file)?;
    let rules = registration_rules(&config.get_locale().catalog())?;

    let mut form = FieldController::new(Arc::new(rules), Arc::new(SystemClock));
    enter_values(&mut form, &values)?;
    form.mark_submit_attempted();

    if json {
        println!("{}", serde_json::to_string_pretty(&form.snapshot())?);
    } else {
        for field in form.rules().field_names() {
            if let Some(value) = form.value(field) {
                print_field(field, value, form.visible_error(field));
            }
        }
    }

    let invalid = form.errors().len();
    if invalid > 0 {
        bail!("{} field(s) failed validation", invalid);
    }

    if !json {
        println!("{}", style("✓ All fields are valid").green());
    }
    Ok(())
}
