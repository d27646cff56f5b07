use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;

/// Display state for the service health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Checking,
    Online,
    Degraded,
    Offline,
}

impl HealthState {
    fn text(self) -> &'static str {
        match self {
            HealthState::Checking => "Checking service...",
            HealthState::Online => "Service online",
            HealthState::Degraded => "Model not loaded",
            HealthState::Offline => "Service unreachable",
        }
    }

    fn style_class(self) -> &'static str {
        match self {
            HealthState::Checking => "health-badge health-checking",
            HealthState::Online => "health-badge health-online",
            HealthState::Degraded => "health-badge health-degraded",
            HealthState::Offline => "health-badge health-offline",
        }
    }
}

/// Health indicator that checks the API on mount and on demand.
///
/// Online requires both a "healthy" status and a loaded model; any other
/// decoded response renders as degraded, a failed call as offline.
#[component]
pub fn HealthBadge() -> impl IntoView {
    let api = use_context::<ApiClient>().expect("ApiClient context");
    let (state, set_state) = signal(HealthState::Checking);

    let do_check = move || {
        let api = api.clone();
        set_state.set(HealthState::Checking);
        spawn_local(async move {
            let next = match api.get_health().await {
                Ok(health) if health.is_online() => HealthState::Online,
                Ok(_) => HealthState::Degraded,
                Err(_) => HealthState::Offline,
            };
            set_state.set(next);
        });
    };

    // Check once on mount
    let auto_check = do_check.clone();
    Effect::new(move |_| {
        auto_check();
    });

    view! {
        <button
            class=move || state.get().style_class()
            title="Re-check service health"
            disabled=move || state.get() == HealthState::Checking
            on:click=move |_| do_check()
        >
            <span class="health-dot"></span>
            <span class="health-text">{move || state.get().text()}</span>
        </button>
    }
}
