//! Plain-text rendering of exercises and answer keys.

use crate::generator::{Exercise, ExerciseAnswer};
use crate::planner::AllocationResult;

/// Render the question sheet: each network followed by its requirements
pub fn render_question(exercise: &Exercise) -> String {
    let mut out = String::new();
    for item in &exercise.items {
        out.push_str(&format!("{}: {}\n\n", item.label, item.instance.network));
        for requirement in &item.instance.requirements {
            out.push_str(&format!("{}: {} hosts\n", requirement.id, requirement.host_count));
        }
        out.push_str("\n\n");
    }
    out
}

/// Render one answer: the parent network and its subnets, largest first
pub fn render_answer(answer: &ExerciseAnswer) -> String {
    let mut out = format!("Network: {}\n\n", answer.network);
    match &answer.result {
        AllocationResult::Feasible { records } => {
            for record in records {
                out.push_str(&format!(
                    "Subnet Id: {}\tRequired addresses: {}\tSubnet: {}\n\n",
                    record.requirement_id, record.host_count, record.subnet
                ));
            }
        }
        AllocationResult::Infeasible { reason } => {
            out.push_str(&format!("No valid allocation: {}\n\n", reason));
        }
    }
    out
}

/// Render the full answer key
pub fn render_answers(answers: &[ExerciseAnswer]) -> String {
    answers
        .iter()
        .map(|answer| format!("{}\n", render_answer(answer)))
        .collect()
}
