//! Animated light/dark toggle.

use leptos::*;

use crate::theme::{Theme, ThemeIcon, ThemeSource, ToggleAnimation, ToggleAppearance};

impl ThemeSource for RwSignal<Theme> {
    fn current(&self) -> Theme {
        self.get_untracked()
    }

    fn toggle(&self) -> Theme {
        self.update(|t| *t = t.toggled());
        self.get_untracked()
    }
}

#[component]
pub fn ThemeToggle(
    theme: RwSignal<Theme>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let pulsing = create_rw_signal(false);

    // Timeline that produced the current theme.
    let timeline = move || ToggleAnimation::for_transition(theme.get().toggled());
    let appearance = move || ToggleAppearance::for_theme(theme.get());

    let on_click = move |_| {
        let plan = ToggleAnimation::for_transition(ThemeSource::current(&theme));
        paint_page(&plan);

        pulsing.set(true);
        // Forward leg of the pulse; the yoyo leg runs as the scale settles.
        set_timeout(move || pulsing.set(false), plan.icon.duration);

        let next = ThemeSource::toggle(&theme);
        tracing::debug!(theme = next.as_str(), "theme toggled");
    };

    view! {
        <button
            on:click=on_click
            class=format!(
                "relative inline-flex items-center justify-center w-12 h-6 rounded-full focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-offset-2 {class}"
            )
            style=move || {
                let plan = timeline();
                format!(
                    "background-color: {}; transition: {};",
                    appearance().track_color,
                    plan.track.transition_css("background-color"),
                )
            }
            aria-label="Toggle dark mode"
        >
            <div
                class=move || format!("absolute inset-0 flex items-center justify-center {}", appearance().icon_class)
                style=move || {
                    let plan = timeline();
                    format!(
                        "transform: {}; transition: transform {}ms {};",
                        plan.icon.transform_css(pulsing.get()),
                        plan.icon.duration.as_millis(),
                        plan.icon.ease.css(),
                    )
                }
            >
                {move || match appearance().icon {
                    ThemeIcon::Moon => "\u{263E}",
                    ThemeIcon::Sun => "\u{2600}",
                }}
            </div>
        </button>
    }
}

fn paint_page(plan: &ToggleAnimation) {
    let Some(body) = document().body() else {
        return;
    };

    let style = body.style();
    let _ = style.set_property("transition", &plan.page.transition_css("background-color"));
    let _ = style.set_property("background-color", plan.page.to);
}
