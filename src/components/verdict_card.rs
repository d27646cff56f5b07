use leptos::prelude::*;

use crate::api::Prediction;
use crate::formatter::{classify, format_percent};

/// Result card for a single-flow verdict.
#[component]
pub fn VerdictCard(prediction: Prediction) -> impl IntoView {
    let display = classify(&prediction.verdict);
    let raw_class = prediction.verdict.raw();

    view! {
        <div class=format!("result-box {}", display.style_class)>
            <div class="result-title">{format!("{} {}", display.icon, display.label)}</div>
            <div class="result-detail">
                <strong>"Detected class: "</strong>
                {raw_class}
            </div>
            {prediction.confidence.map(|value| view! {
                <div class="result-detail">
                    <strong>"Confidence: "</strong>
                    {format_percent(value)}
                </div>
            })}
            {prediction.probability_attack.map(|value| view! {
                <div class="result-detail">
                    <strong>"P(attack): "</strong>
                    {format_percent(value)}
                </div>
            })}
            {prediction.probability_normal.map(|value| view! {
                <div class="result-detail">
                    <strong>"P(normal): "</strong>
                    {format_percent(value)}
                </div>
            })}
        </div>
    }
}
