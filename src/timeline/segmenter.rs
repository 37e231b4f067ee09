//! Timeline segmenter
//!
//! Turns the evaluator's schedule into segments tiling `[current age, terminal)`.
//! Each segment is priced at its start age; neighbours with an identical formula
//! selector collapse into one.

use crate::eligibility::{EligibilityEvaluator, FormulaSelector, OldAgePlan};
use super::segment::Segment;

/// Segment the timeline for one old-age plan
pub fn segment(evaluator: &EligibilityEvaluator, plan: OldAgePlan) -> Vec<Segment> {
    let schedule = evaluator.schedule(plan);
    let terminal_age = evaluator.terminal_age();

    let mut segments: Vec<Segment> = Vec::with_capacity(schedule.len());
    let mut previous: Option<FormulaSelector> = None;

    for (index, (start_age, selector)) in schedule.iter().enumerate() {
        let end_age = schedule
            .get(index + 1)
            .map(|(next, _)| *next)
            .unwrap_or(terminal_age);
        if end_age <= *start_age {
            continue;
        }

        if previous.as_ref() == Some(selector) {
            if let Some(last) = segments.last_mut() {
                last.end_age = end_age;
                continue;
            }
        }

        let result = evaluator.amount(selector);
        log::trace!(
            "segment [{}, {}) {} = {:.0}",
            start_age,
            end_age,
            selector.label(),
            result.total
        );
        segments.push(Segment {
            start_age: *start_age,
            end_age,
            annual_amount: result.total,
            label: selector.label(),
            components: result.components,
        });
        previous = Some(*selector);
    }

    segments
}
