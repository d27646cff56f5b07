use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiClient, Prediction};
use crate::components::verdict_card::VerdictCard;

/// Input width of the deployed CICIDS2017 model.
const EXAMPLE_FEATURE_COUNT: usize = 78;

/// Panel state for the single-flow form.
#[derive(Debug, Clone)]
enum PredictState {
    Idle,
    Loading,
    Complete(Prediction),
    Failed(String),
}

/// Single-flow analysis: paste a feature vector, get a verdict.
///
/// Input is validated before any request is sent; a malformed vector
/// never reaches the network.
#[component]
pub fn SinglePredictPage() -> impl IntoView {
    let api = use_context::<ApiClient>().expect("ApiClient context");
    let (input, set_input) = signal(String::new());
    let (state, set_state) = signal(PredictState::Idle);

    let load_example = move |_| {
        let features: Vec<f64> = (0..EXAMPLE_FEATURE_COUNT)
            .map(|_| js_sys::Math::random())
            .collect();
        let example = serde_json::json!({ "features": features });
        set_input.set(serde_json::to_string_pretty(&example).unwrap_or_default());
    };

    let on_submit = move |_| {
        let features = match api::parse_feature_input(&input.get()) {
            Ok(features) => features,
            Err(e) => {
                set_state.set(PredictState::Failed(e.to_string()));
                return;
            }
        };

        set_state.set(PredictState::Loading);
        let api = api.clone();
        spawn_local(async move {
            match api.predict_single(&features).await {
                Ok(prediction) => set_state.set(PredictState::Complete(prediction)),
                Err(e) => set_state.set(PredictState::Failed(e.to_string())),
            }
        });
    };

    let busy = move || matches!(state.get(), PredictState::Loading);

    view! {
        <div class="page single-predict-page">
            <h2>"Single Analysis"</h2>
            <p class="page-description">
                "Paste one feature vector as JSON to classify a single network flow."
            </p>

            <div class="form-group">
                <label for="features-input">"Feature vector"</label>
                <textarea
                    id="features-input"
                    class="input features-input"
                    rows=10
                    placeholder=r#"{"features": [0.0, 0.0, ...]}"#
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                ></textarea>
            </div>

            <div class="action-buttons">
                <button class="btn btn-primary" on:click=on_submit disabled=busy>
                    {move || if busy() { "Analyzing..." } else { "Analyze Flow" }}
                </button>
                <button class="btn btn-secondary" on:click=load_example disabled=busy>
                    "Load Example"
                </button>
            </div>

            {move || match state.get() {
                PredictState::Idle => ().into_any(),
                PredictState::Loading => view! {
                    <div class="result-box info">
                        <div class="loading">"Analysis in progress..."</div>
                    </div>
                }
                .into_any(),
                PredictState::Complete(prediction) => view! {
                    <VerdictCard prediction=prediction />
                }
                .into_any(),
                PredictState::Failed(message) => view! {
                    <div class="result-box info">
                        <div class="result-title">"Analysis failed"</div>
                        <div class="result-detail">{message}</div>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
