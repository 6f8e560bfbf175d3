//! Plain-text views of wizard state and tax results.

use std::fmt::Write;

use filer_core::calculations::TaxBreakdown;
use filer_core::{FieldKind, FilingState, ProgressSummary, TaxSchedule, TaxYear};

use crate::utils::{format_amount, format_percent};

pub fn breakdown(year: TaxYear, result: &TaxBreakdown, slab_count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (tax year {year})", year.fiscal_label());
    let _ = writeln!(out, "Annual income:   {:>16}", format_amount(result.annual_income));
    let _ = writeln!(out, "Tax payable:     {:>16}", format_amount(result.tax));
    let _ = writeln!(out, "Monthly tax:     {:>16}", format_amount(result.monthly_tax));
    let _ = writeln!(out, "Net income:      {:>16}", format_amount(result.net_income));
    let _ = writeln!(
        out,
        "Slab:            {} of {} ({} marginal)",
        result.slab_index + 1,
        slab_count,
        format_percent(result.marginal_rate)
    );
    let _ = write!(out, "Effective rate:  {}", format_percent(result.effective_rate));
    out
}

pub fn schedule(year: TaxYear, schedule: &TaxSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (tax year {year})", year.fiscal_label());

    let mut lower = None;
    for slab in schedule.slabs() {
        let range = match (lower, slab.upper_bound) {
            (None, Some(upper)) => format!("Up to {}", format_amount(upper)),
            (Some(lower), Some(upper)) => {
                format!("{} - {}", format_amount(lower), format_amount(upper))
            }
            (Some(lower), None) => format!("Above {}", format_amount(lower)),
            (None, None) => "All income".to_string(),
        };
        let _ = writeln!(
            out,
            "  {range:<32} {:>16} + {}",
            format_amount(slab.base_tax),
            format_percent(slab.marginal_rate)
        );
        lower = slab.upper_bound;
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn status(state: &FilingState) -> String {
    let step = state.current_step();
    let sub_step = state.current_sub_step();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Step {} of {}: {}",
        state.current_step_index() + 1,
        state.steps().len(),
        step.title
    );
    let _ = writeln!(
        out,
        "  Sub-step {} of {}: {}{}",
        state.current_sub_step_index() + 1,
        step.sub_steps.len(),
        sub_step.title,
        if sub_step.completed { " [done]" } else { "" }
    );
    let _ = writeln!(
        out,
        "Progress: {}% ({} of {} sub-steps)",
        state.progress_percentage(),
        state.completed_sub_steps(),
        state.total_sub_steps()
    );
    if state.submitted() {
        let _ = writeln!(out, "Filing submitted.");
    }

    let _ = writeln!(out, "Fields:");
    for field in sub_step.kind.fields() {
        let value = match sub_step.data.get(field.name) {
            Some(_) if field.kind == FieldKind::Password => "********".to_string(),
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };
        let marker = if field.required { "*" } else { " " };
        let _ = match field.hint {
            Some(hint) => writeln!(out, "  {marker} {:<20} {value}  ({hint})", field.name),
            None => writeln!(out, "  {marker} {:<20} {value}", field.name),
        };
    }

    let missing = sub_step.missing_required_fields();
    if !missing.is_empty() {
        let _ = writeln!(out, "Missing required: {}", missing.join(", "));
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn summary(summary: &ProgressSummary) -> String {
    let updated = summary
        .last_updated
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Step {} of {}, {}% complete (last updated: {updated})",
        summary.current_step, summary.total_steps, summary.progress_percentage
    )
}

/// Short `(step, sub-step)` position line shown after navigation.
pub fn position(state: &FilingState) -> String {
    format!(
        "Now at {} > {}",
        state.current_step().title,
        state.current_sub_step().title
    )
}
