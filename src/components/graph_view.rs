//! The chart area of the page.

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use log::debug;

use crate::chart::Mount;
use crate::components::force_graph::{CanvasLibrary, CanvasSurface};
use crate::config::DemoConfig;

type CanvasMount = Mount<CanvasLibrary, Interval, Timeout>;

/// Fixed-height chart whose edges are rewired on a timer.
///
/// Binds once the canvas is mounted. While the canvas is not attached to the
/// document yet, binding is retried every `mount_retry_delay_ms`, at most
/// `mount_retry_limit` times. Unmounting cancels a pending retry and tears
/// down the chart together with its refresh timer.
#[component]
pub fn GraphView(config: DemoConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let height = config.surface_height;
	let style = format!("width: 100%; height: {}px;", height);
	let mount: StoredValue<CanvasMount, LocalStorage> = StoredValue::new_local(Mount::new(
		CanvasLibrary::default(),
		config,
		|interval_ms, tick| Interval::new(interval_ms, tick),
		|delay_ms, retry| Timeout::new(delay_ms, retry),
	));

	Effect::new(move |_| {
		match CanvasSurface::from_element(canvas_ref.get().map(Into::into), height) {
			Ok(surface) => mount.with_value(|mount| mount.bind(surface)),
			Err(e) => debug!("graph view: {}, waiting for mount", e),
		}
	});

	on_cleanup(move || {
		mount.try_with_value(|mount| mount.close());
	});

	view! {
		<div class="graph-view" style=style>
			<canvas node_ref=canvas_ref style="display: block;" />
		</div>
	}
}
