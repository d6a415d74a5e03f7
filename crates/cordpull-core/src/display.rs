//! Text rendering of decisions for logs and status displays.

use cordpull_types::{DecisionReport, UtilityBreakdown, WorkerAction};

/// Render a signed score with an explicit `+` for positive values.
///
/// Zero renders as `0`.
pub fn signed_display(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Headline describing the sampled action.
pub const fn action_headline(action: WorkerAction) -> &'static str {
    match action {
        WorkerAction::Stop => "WORKER PULLED THE CORD",
        WorkerAction::Continue => "WORKER KEPT GOING",
    }
}

/// Event log line for a decision, e.g.
/// `Worker STOPPED. (97% statistical probability in S2)`.
pub fn decision_message(report: &DecisionReport) -> String {
    let action = report.outcome.selected_action;
    let verb = match action {
        WorkerAction::Stop => "STOPPED",
        WorkerAction::Continue => "CONTINUED",
    };
    format!(
        "Worker {verb}. ({}% statistical probability in {})",
        report.percentages.for_action(action),
        report.environment.code()
    )
}

/// One `Label: +value` line per sub-term.
pub fn breakdown_lines(breakdown: &UtilityBreakdown) -> Vec<String> {
    breakdown
        .terms
        .iter()
        .map(|term| {
            format!(
                "{}: {}",
                term.label.display_name(),
                signed_display(term.value)
            )
        })
        .collect()
}
