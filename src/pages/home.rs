use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, StatsSnapshot};
use crate::components::history_panel::HistoryPanel;

const RECENT_SCANS: usize = 5;

/// Overview page: descriptive model cards plus the most recent scans.
/// The stats and history fetches start independently on mount.
#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_context::<ApiClient>().expect("ApiClient context");
    let (stats, set_stats) = signal::<Option<StatsSnapshot>>(None);
    let (stats_loading, set_stats_loading) = signal(true);
    let (stats_error, set_stats_error) = signal::<Option<String>>(None);

    spawn_local(async move {
        match api.get_stats().await {
            Ok(snapshot) => set_stats.set(Some(snapshot)),
            Err(e) => set_stats_error.set(Some(format!("Could not load model info: {e}"))),
        }
        set_stats_loading.set(false);
    });

    view! {
        <div class="page home-page">
            <h2>"Overview"</h2>
            <p class="page-description">
                "Classify network flows against the cloud-hosted detection model, \
                 one at a time or from a CSV capture."
            </p>

            {move || {
                if stats_loading.get() {
                    view! { <p class="stats-loading">"Loading model info..."</p> }.into_any()
                } else if let Some(err) = stats_error.get() {
                    view! { <p class="stats-error">{err}</p> }.into_any()
                } else if let Some(stats) = stats.get() {
                    view! { <StatsGrid stats=stats /> }.into_any()
                } else {
                    view! { <p class="stats-error">"No model info available."</p> }.into_any()
                }
            }}

            <HistoryPanel limit=RECENT_SCANS />
        </div>
    }
}

/// Card grid for whatever descriptive fields this backend variant reports.
#[component]
fn StatsGrid(stats: StatsSnapshot) -> impl IntoView {
    let layers = stats.layers.as_ref().map(|widths| {
        widths
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    });

    view! {
        <div class="card-grid">
            {stats.model_architecture.clone().map(|value| view! {
                <div class="card stat-card">
                    <h4>"Architecture"</h4>
                    <div class="value">{value}</div>
                </div>
            })}
            {stats.accuracy.map(|value| view! {
                <div class="card stat-card">
                    <h4>"Accuracy"</h4>
                    <div class="value">{format!("{value}%")}</div>
                </div>
            })}
            {stats.dataset.clone().map(|value| view! {
                <div class="card stat-card">
                    <h4>"Dataset"</h4>
                    <div class="value">{value}</div>
                </div>
            })}
            {stats.cloud_platform.clone().map(|value| view! {
                <div class="card stat-card">
                    <h4>"Cloud"</h4>
                    <div class="value">{value}</div>
                </div>
            })}
            {layers.map(|value| view! {
                <div class="card stat-card">
                    <h4>"Layers"</h4>
                    <div class="value">{value}</div>
                </div>
            })}
            {stats.training_method.clone().map(|value| view! {
                <div class="card stat-card">
                    <h4>"Training"</h4>
                    <div class="value">{value}</div>
                </div>
            })}
        </div>

        {stats.attack_types.clone().map(|types| view! {
            <div class="attack-types">
                <h3>"Detected Attack Families"</h3>
                <ul class="attack-type-list">
                    {types.into_iter().map(|name| view! {
                        <li class="attack-type">{name}</li>
                    }).collect::<Vec<_>>()}
                </ul>
            </div>
        })}
    }
}
