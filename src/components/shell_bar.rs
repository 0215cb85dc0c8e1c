use leptos::prelude::*;

use crate::components::flow_canvas::ZoomDirection;
use crate::theme;

/// Top bar with the title and the zoom/reset buttons.
#[component]
pub fn ShellBar(
	/// Called with the direction of the zoom button pressed.
	on_zoom: impl Fn(ZoomDirection) + Clone + 'static,
	/// Called by the reset button.
	on_reset: impl Fn() + 'static,
) -> impl IntoView {
	let zoom_in = on_zoom.clone();
	let zoom_out = on_zoom;
	let bar_style = format!(
		"display: flex; align-items: center; width: 100%; box-sizing: border-box; padding: 0.5rem 1rem; \
		 background: {}; color: {}; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.2);",
		theme::PRIMARY,
		theme::CONTRAST_TEXT,
	);
	let button_style = format!(
		"margin-left: 0.5rem; width: 2.5rem; height: 2.5rem; border: none; border-radius: 50%; \
		 cursor: pointer; font-size: 1.25rem; background: {}; color: {};",
		theme::PRIMARY_DARK,
		theme::CONTRAST_TEXT,
	);

	view! {
		<header class="shell-bar" style=bar_style>
			<h1 style="flex-grow: 1; margin: 0; font-size: 2.5rem; font-weight: 400;">"Flow Create"</h1>
			<button title="Zoom In" style=button_style.clone() on:click=move |_| zoom_in(ZoomDirection::In)>
				"+"
			</button>
			<button title="Zoom Out" style=button_style.clone() on:click=move |_| zoom_out(ZoomDirection::Out)>
				"−"
			</button>
			<button title="Reset zoom and pan" style=button_style on:click=move |_| on_reset()>
				"⟲"
			</button>
		</header>
	}
}
