use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::api::ApiClient;
use crate::components::sidebar::Sidebar;
use crate::pages::batch_predict::BatchPredictPage;
use crate::pages::history::HistoryPage;
use crate::pages::home::HomePage;
use crate::pages::single_predict::SinglePredictPage;
use crate::theme::{self, apply_theme, ThemeContext};

#[component]
pub fn App() -> impl IntoView {
    // One client for the whole tree, pointed at the serving origin
    provide_context(ApiClient::from_window_origin());

    let (theme, set_theme) = signal(theme::load_preference());
    provide_context(ThemeContext { theme, set_theme });

    // Apply and persist the theme whenever the signal changes
    Effect::new(move |_| {
        let t = theme.get();
        apply_theme(&t);
        theme::store_preference(&t);
    });

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/single") view=SinglePredictPage />
                        <Route path=path!("/batch") view=BatchPredictPage />
                        <Route path=path!("/history") view=HistoryPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
