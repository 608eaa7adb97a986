use anyhow::Result;
use formflow_core::SessionConfig;
use formflow_validation::registration_rules;

/// Print the registration rule catalogue as JSON
pub fn run(config: &SessionConfig) -> Result<()> {
    let rules = registration_rules(&config.get_locale().catalog())?;
    println!("{}", serde_json::to_string_pretty(&rules.describe())?);
    Ok(())
}
