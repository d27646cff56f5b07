use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, BatchResult};
use crate::components::batch_report::BatchReport;
use crate::components::history_panel::HistoryPanel;

/// Panel state for the batch upload.
#[derive(Debug, Clone)]
enum BatchState {
    Idle,
    Loading,
    Complete(BatchResult),
    Failed(String),
}

/// The submit control opens only when a file is selected and no request
/// is in flight. This gate is the double-submit protection; there is no
/// request deduplication behind it.
fn submit_enabled(has_file: bool, busy: bool) -> bool {
    has_file && !busy
}

/// Batch analysis: upload a CSV capture, get per-flow verdicts.
///
/// A successful scan reloads the history panel below the report.
#[component]
pub fn BatchPredictPage() -> impl IntoView {
    let api = use_context::<ApiClient>().expect("ApiClient context");
    let file_input = NodeRef::<Input>::new();
    let (selected_name, set_selected_name) = signal::<Option<String>>(None);
    let (state, set_state) = signal(BatchState::Idle);
    let (history_key, set_history_key) = signal(0u32);

    let on_file_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let name = input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| file.name());
        set_selected_name.set(name);
    };

    let busy = move || matches!(state.get(), BatchState::Loading);

    let on_submit = move |_| {
        // The File itself lives on the input element; the signal only
        // tracks whether one is selected.
        let Some(file) = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };

        set_state.set(BatchState::Loading);
        let api = api.clone();
        spawn_local(async move {
            match api.predict_batch(&file).await {
                Ok(result) => {
                    set_state.set(BatchState::Complete(result));
                    // Reload the history panel now that the scan is recorded
                    set_history_key.update(|k| *k += 1);
                }
                Err(e) => set_state.set(BatchState::Failed(e.to_string())),
            }
        });
    };

    view! {
        <div class="page batch-predict-page">
            <h2>"Batch Analysis"</h2>
            <p class="page-description">
                "Upload a CSV capture to classify every flow in one pass."
            </p>

            <div class="form-group">
                <label for="csv-file" class="btn btn-secondary">"Choose CSV File"</label>
                <input
                    node_ref=file_input
                    type="file"
                    id="csv-file"
                    accept=".csv"
                    style="display: none"
                    on:change=on_file_change
                />
                <span class="file-name">
                    {move || match selected_name.get() {
                        Some(name) => format!("\u{2713} {name}"),
                        None => "No file selected".to_string(),
                    }}
                </span>
            </div>

            <button
                class="btn btn-primary"
                on:click=on_submit
                disabled=move || !submit_enabled(selected_name.get().is_some(), busy())
            >
                {move || if busy() { "Scanning..." } else { "Run Batch Scan" }}
            </button>

            {move || match state.get() {
                BatchState::Idle => ().into_any(),
                BatchState::Loading => view! {
                    <div class="result-box info">
                        <div class="loading">"Scanning capture..."</div>
                    </div>
                }
                .into_any(),
                BatchState::Complete(result) => view! {
                    <BatchReport result=result />
                }
                .into_any(),
                BatchState::Failed(message) => view! {
                    <div class="result-box info">
                        <div class="result-title">"Scan failed"</div>
                        <div class="result-detail">{message}</div>
                    </div>
                }
                .into_any(),
            }}

            // Remount on every bump so the panel refetches after a scan
            {move || {
                history_key.get();
                view! { <HistoryPanel /> }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::submit_enabled;

    #[test]
    fn gate_is_closed_without_a_file() {
        assert!(!submit_enabled(false, false));
        assert!(!submit_enabled(false, true));
    }

    #[test]
    fn gate_is_closed_while_a_scan_is_in_flight() {
        assert!(!submit_enabled(true, true));
    }

    #[test]
    fn selecting_then_clearing_a_file_toggles_the_gate() {
        let mut has_file = false;
        assert!(!submit_enabled(has_file, false));
        has_file = true;
        assert!(submit_enabled(has_file, false));
        has_file = false;
        assert!(!submit_enabled(has_file, false));
    }
}
