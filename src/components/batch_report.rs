use leptos::prelude::*;

use crate::api::BatchResult;
use crate::formatter::{classify, format_percent, summarize_batch};

/// Keep large captures readable; the aggregate counts above the list
/// always cover every row.
const ROW_DISPLAY_LIMIT: usize = 50;

/// Report card for a batch outcome: aggregate counts plus per-row verdicts.
#[component]
pub fn BatchReport(result: BatchResult) -> impl IntoView {
    let summary = summarize_batch(&result);
    let shown = result.rows.len().min(ROW_DISPLAY_LIMIT);
    let elided = result.rows.len().saturating_sub(ROW_DISPLAY_LIMIT);

    let rows = result
        .rows
        .iter()
        .take(ROW_DISPLAY_LIMIT)
        .map(|row| {
            let display = classify(&row.verdict);
            view! {
                <div class="batch-row">
                    <span class="batch-row-index">{format!("Row {}", row.index)}</span>
                    <span class=format!("batch-row-verdict {}", display.style_class)>
                        {display.label}
                    </span>
                    {row.confidence.map(|value| view! {
                        <span class="batch-row-confidence">{format_percent(value)}</span>
                    })}
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class=format!(
            "result-box {}",
            if summary.alert { "attack" } else { "normal" },
        )>
            <div class="result-title">{summary.headline}</div>
            <div class="result-detail">
                <strong>"File: "</strong>
                {result.filename.clone()}
            </div>
            <div class="result-detail">
                <strong>"Total flows: "</strong>
                {result.total}
            </div>
            <div class="result-detail">
                <strong>"Attacks: "</strong>
                {format!("{} ({})", result.attacks, format_percent(summary.percent_attack))}
            </div>
            <div class="result-detail">
                <strong>"Normal: "</strong>
                {format!("{} ({})", result.normal(), format_percent(summary.percent_normal))}
            </div>
            {result.accuracy.map(|value| view! {
                <div class="result-detail">
                    <strong>"Model accuracy: "</strong>
                    {format_percent(value)}
                </div>
            })}
            {result.note.clone().map(|note| view! {
                <p class="result-note">{note}</p>
            })}

            {(shown > 0).then(|| view! {
                <div class="batch-rows">{rows}</div>
            })}
            {(elided > 0).then(|| view! {
                <p class="batch-elided">
                    {format!("Showing the first {shown} rows; {elided} more not listed.")}
                </p>
            })}
        </div>
    }
}
