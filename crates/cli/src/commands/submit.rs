use crate::utils::{enter_session_values, load_values, print_session_fields, print_transitions};
use anyhow::{bail, Result};
use console::style;
use formflow_core::{
    Clock, FormSession, SessionConfig, SimulatedSubmitter, SubmitOutcome, SystemClock,
};
use std::path::Path;
use std::sync::Arc;

/// Run one submit cycle of a values file against the simulated backend
pub async fn run(
    file: &Path,
    config: SessionConfig,
    fail: Option<String>,
    wait: bool,
) -> Result<()> {
    let values = load_values(file)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let mut submitter =
        SimulatedSubmitter::new(Arc::clone(&clock), *config.get_simulated_latency());
    if let Some(reason) = fail {
        submitter = submitter.failing_with(reason);
    }

    let window = *config.get_auto_reset_after();
    let mut session = FormSession::registration(Arc::new(submitter), clock, config)?;
    enter_session_values(&mut session, &values)?;

    println!("{}", style("Submitting...").dim());
    let outcome = session.submit().await;
    print_transitions(session.history());

    match outcome? {
        SubmitOutcome::Rejected(errors) => {
            print_session_fields(&session);
            bail!("Submission rejected: {} field(s) failed validation", errors.len());
        }
        SubmitOutcome::Succeeded(_) => {
            if let Some(message) = session.success_message() {
                println!("{}", style(message).green().bold());
            }
        }
    }

    if wait {
        println!(
            "{}",
            style(format!("Notice visible for {:.1}s", window.as_secs_f64())).dim()
        );
        let seen = session.history().len();
        session.settle().await;
        for transition in &session.history().entries()[seen..] {
            println!("  {} → {} ({:?})", transition.from, transition.to, transition.trigger);
        }
    }

    println!("Final state: {}", style(session.state()).cyan());
    Ok(())
}
