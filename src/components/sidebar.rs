use leptos::prelude::*;

use crate::components::health_badge::HealthBadge;
use crate::theme::ThemeContext;

#[component]
pub fn Sidebar() -> impl IntoView {
    let theme_ctx = use_context::<ThemeContext>().expect("ThemeContext provided");

    let cycle_theme = move |_| {
        let next = match theme_ctx.theme.get().as_str() {
            "system" => "light",
            "light" => "dark",
            _ => "system",
        };
        theme_ctx.set_theme.set(next.to_string());
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"NetSentry"</h1>
                <p class="sidebar-subtitle">"Intrusion Detection Dashboard"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Overview"</a>
                </li>
                <li class="nav-item">
                    <a href="/single" class="nav-link">"Single Analysis"</a>
                </li>
                <li class="nav-item">
                    <a href="/batch" class="nav-link">"Batch Analysis"</a>
                </li>
                <li class="nav-item">
                    <a href="/history" class="nav-link">"Scan History"</a>
                </li>
            </ul>
            <div class="sidebar-footer">
                <HealthBadge />
                <button class="btn btn-small btn-secondary theme-toggle" on:click=cycle_theme>
                    {move || format!("Theme: {}", theme_ctx.theme.get())}
                </button>
            </div>
        </nav>
    }
}
