//! History panel showing past batch scans.
//!
//! The history store is best-effort: a failed fetch renders the
//! unavailable state and logs to the console, it never raises a dialog.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, HistoryEntry};
use crate::formatter::history_badge;

/// Table of past scans, newest first (server order is preserved as-is).
#[component]
pub fn HistoryPanel(
    /// Show at most this many rows (compact "recent scans" use).
    #[prop(optional, into)]
    limit: Option<usize>,
) -> impl IntoView {
    let api = use_context::<ApiClient>().expect("ApiClient context");
    let (entries, set_entries) = signal::<Option<Vec<HistoryEntry>>>(None);
    let (loading, set_loading) = signal(true);
    let (unavailable, set_unavailable) = signal(false);

    // Load on mount
    spawn_local(async move {
        match api.get_history().await {
            Ok(list) => set_entries.set(Some(list)),
            Err(e) => {
                web_sys::console::error_1(&format!("history fetch failed: {e}").into());
                set_unavailable.set(true);
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="history-panel">
            <h4 class="history-title">"Scan History"</h4>

            {move || {
                if loading.get() {
                    view! { <p class="history-loading">"Loading history..."</p> }.into_any()
                } else if unavailable.get() {
                    view! { <p class="history-empty">"History is unavailable right now."</p> }
                        .into_any()
                } else if let Some(entries) = entries.get() {
                    if entries.is_empty() {
                        view! { <p class="history-empty">"No scans recorded yet."</p> }.into_any()
                    } else {
                        let shown: Vec<HistoryEntry> = match limit {
                            Some(n) => entries.into_iter().take(n).collect(),
                            None => entries,
                        };
                        view! {
                            <table class="history-table">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"File"</th>
                                        <th>"Flows"</th>
                                        <th>"Attacks"</th>
                                        <th>"Verdict"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {shown.iter().map(|entry| {
                                        let badge = history_badge(entry);
                                        view! {
                                            <tr class="history-item">
                                                <td class="history-date">{entry.date.clone()}</td>
                                                <td class="history-file">{entry.filename.clone()}</td>
                                                <td>{entry.total}</td>
                                                <td>{entry.attacks}</td>
                                                <td>
                                                    <span class=format!("history-badge {}", badge.style_class)>
                                                        {badge.icon} " " {badge.label}
                                                    </span>
                                                </td>
                                            </tr>
                                        }
                                    }).collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }
                } else {
                    view! { <p class="history-empty">"No data"</p> }.into_any()
                }
            }}
        </div>
    }
}
