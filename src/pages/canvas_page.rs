use leptos::prelude::*;

use crate::components::flow_canvas::{CanvasCommands, CanvasHandle, FlowCanvas, ZoomDirection};
use crate::components::shell_bar::ShellBar;
use crate::theme;

/// Flowchart editor route.
#[component]
pub fn CanvasPage() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<Editor />
		</ErrorBoundary>
	}
}

/// Top bar over a canvas filling the rest of the viewport. The handle is
/// created here so the bar's buttons reach the canvas it mounts.
#[component]
fn Editor() -> impl IntoView {
	let handle = CanvasHandle::new();
	let (zoom_handle, reset_handle) = (handle.clone(), handle.clone());
	let wrapper_style = format!(
		"display: flex; flex-direction: column; align-items: center; height: 100vh; width: 100%; \
		 border-bottom: 3px solid {};",
		theme::PRIMARY_LIGHT,
	);

	view! {
		<main class="canvas-page" style=wrapper_style>
			<ShellBar
				on_zoom=move |direction: ZoomDirection| (&zoom_handle).on_zoom(direction)
				on_reset=move || (&reset_handle).on_reset()
			/>
			<FlowCanvas handle=handle />
		</main>
	}
}
