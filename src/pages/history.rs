use leptos::prelude::*;

use crate::components::history_panel::HistoryPanel;

/// Full scan history, in the order the server returns it.
#[component]
pub fn HistoryPage() -> impl IntoView {
    view! {
        <div class="page history-page">
            <h2>"Scan History"</h2>
            <p class="page-description">
                "Every past batch scan with its aggregate outcome."
            </p>

            <HistoryPanel />
        </div>
    }
}
