//! graph-pulse: a force-directed graph whose edges are rewired on a timer.
//!
//! Ten nodes sit in a physics simulation; every refresh interval a fresh set of
//! random bidirectional edges replaces the old one while the nodes stay put.
//! The chart is a WASM canvas component with pan/zoom, dragging, hover
//! emphasis and tooltips.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod chart;
pub mod components;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;

pub use components::GraphView;
pub use config::DemoConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-pulse: logging initialized");
}

/// Load settings from a script element with id="demo-config".
/// Missing element means defaults; invalid settings are logged and replaced
/// by defaults.
fn load_demo_config() -> DemoConfig {
	let Some(json_text) = demo_config_text() else {
		return DemoConfig::default();
	};

	match DemoConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"graph-pulse: loaded settings, {} nodes every {} ms",
				config.node_count, config.refresh_interval_ms
			);
			config
		}
		Err(e) => {
			warn!("graph-pulse: ignoring settings: {}", e);
			DemoConfig::default()
		}
	}
}

fn demo_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("demo-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component: a header above the live chart.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_demo_config();
	let title = config.title.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="graph-page">
			<h2>{title}</h2>
			<GraphView config=config />
		</main>
	}
}
