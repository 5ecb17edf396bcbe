//! The canvas chart library.
//!
//! [`CanvasLibrary`] creates a [`CanvasChart`] on a [`CanvasSurface`]: it sizes
//! the canvas to its container, wires up mouse and wheel handlers for dragging,
//! panning and zooming, and runs an animation loop via
//! `requestAnimationFrame` that advances the simulation and redraws each frame.
//! Disposing the chart stops the loop and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::chart::binder::{ChartInstance, ChartLibrary, DisplaySurface};
use crate::chart::option::OptionUpdate;
use crate::chart::registry;
use crate::error::BindingError;

const FALLBACK_WIDTH: f64 = 800.0;
/// Longest step fed to the simulation, in seconds. Keeps a backgrounded tab
/// from launching nodes when it comes back.
const MAX_FRAME_DT: f64 = 0.05;

/// A canvas element with a fixed height; the width follows its container.
#[derive(Clone)]
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	height: f64,
}

impl CanvasSurface {
	/// Surface on `canvas`, drawn `height` CSS pixels tall.
	pub fn new(canvas: HtmlCanvasElement, height: f64) -> Self {
		Self { canvas, height }
	}

	/// Surface for a canvas that may not have been rendered yet.
	pub fn from_element(
		canvas: Option<HtmlCanvasElement>,
		height: f64,
	) -> Result<Self, BindingError> {
		canvas
			.map(|canvas| Self::new(canvas, height))
			.ok_or(BindingError::SurfaceMissing)
	}

	/// Size the canvas to its container and return `(width, height)`.
	fn fit(&self) -> (f64, f64) {
		let width = container_width(&self.canvas);
		self.canvas.set_width(width as u32);
		self.canvas.set_height(self.height as u32);
		(width, self.height)
	}
}

impl DisplaySurface for CanvasSurface {
	fn is_attached(&self) -> bool {
		self.canvas.is_connected()
	}
}

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(FALLBACK_WIDTH)
}

fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Creates canvas charts.
#[derive(Clone, Default)]
pub struct CanvasLibrary {
	/// Theme every new chart starts with.
	pub theme: Theme,
}

impl ChartLibrary for CanvasLibrary {
	type Surface = CanvasSurface;
	type Chart = CanvasChart;

	fn init(&self, surface: &CanvasSurface) -> Result<CanvasChart, BindingError> {
		if let Some(missing) = registry::first_missing(&registry::DEFAULT_CAPABILITIES) {
			return Err(BindingError::MissingCapability(missing));
		}
		let window = web_sys::window().ok_or_else(|| BindingError::Context("no window".into()))?;
		let ctx: CanvasRenderingContext2d = surface
			.canvas
			.get_context("2d")
			.map_err(|e| BindingError::Context(format!("{:?}", e)))?
			.ok_or_else(|| BindingError::Context("2d context unavailable".into()))?
			.dyn_into()
			.map_err(|_| BindingError::Context("unexpected context type".into()))?;

		let (width, height) = surface.fit();
		let mut chart = CanvasChart {
			canvas: surface.canvas.clone(),
			state: Rc::new(RefCell::new(ForceGraphState::new(
				width,
				height,
				self.theme.clone(),
			))),
			listeners: Vec::new(),
			animate: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			disposed: false,
		};
		chart.listen_pointer();
		chart.listen_resize(&window);
		chart.start_animation(&window, ctx);

		info!("canvas: chart created at {}x{}", width, height);
		Ok(chart)
	}
}

struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// A force graph drawn on a canvas.
pub struct CanvasChart {
	canvas: HtmlCanvasElement,
	state: Rc<RefCell<ForceGraphState>>,
	listeners: Vec<Listener>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
	disposed: bool,
}

impl CanvasChart {
	fn on<F>(&mut self, target: EventTarget, event: &'static str, mut handler: F)
	where
		F: FnMut(&mut ForceGraphState, &Event) + 'static,
	{
		let state = self.state.clone();
		let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
			if let Ok(mut state) = state.try_borrow_mut() {
				handler(&mut state, &ev);
			}
		});
		if target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("canvas: could not listen for {}", event);
		}
		self.listeners.push(Listener {
			target,
			event,
			callback,
		});
	}

	fn listen_pointer(&mut self) {
		let target: EventTarget = self.canvas.clone().into();

		let canvas = self.canvas.clone();
		self.on(target.clone(), "mousedown", move |state, ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let (x, y) = local_position(&canvas, ev);
				state.pointer_down(x, y);
			}
		});

		let canvas = self.canvas.clone();
		self.on(target.clone(), "mousemove", move |state, ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let (x, y) = local_position(&canvas, ev);
				state.pointer_move(x, y);
				let cursor = if state.drag.node.is_some() || state.pan.active {
					"grabbing"
				} else if state.hover.is_some() {
					"pointer"
				} else {
					"default"
				};
				let _ = canvas.style().set_property("cursor", cursor);
			}
		});

		self.on(target.clone(), "mouseup", |state, _| state.pointer_up());
		self.on(target.clone(), "mouseleave", |state, _| state.pointer_leave());

		let canvas = self.canvas.clone();
		self.on(target, "wheel", move |state, ev| {
			if let Some(wheel) = ev.dyn_ref::<web_sys::WheelEvent>() {
				let (x, y) = local_position(&canvas, wheel);
				if state.wheel(x, y, wheel.delta_y()) {
					ev.prevent_default();
				}
			}
		});
	}

	fn listen_resize(&mut self, window: &Window) {
		let canvas = self.canvas.clone();
		self.on(window.clone().into(), "resize", move |state, _| {
			let width = container_width(&canvas);
			canvas.set_width(width as u32);
			state.resize(width, state.height);
		});
	}

	fn start_animation(&mut self, window: &Window, ctx: CanvasRenderingContext2d) {
		let state = self.state.clone();
		let animate_inner = self.animate.clone();
		let frame_id = self.frame_id.clone();
		let mut last = js_sys::Date::now();

		*self.animate.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_DT);
			last = now;

			if let Ok(mut state) = state.try_borrow_mut() {
				state.tick(dt);
				render::render(&state, &ctx);
			}
			if let Some(cb) = animate_inner.borrow().as_ref() {
				if let Some(window) = web_sys::window() {
					frame_id.set(
						window
							.request_animation_frame(cb.as_ref().unchecked_ref())
							.ok(),
					);
				}
			}
		}));

		if let Some(cb) = self.animate.borrow().as_ref() {
			self.frame_id
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}
}

impl ChartInstance for CanvasChart {
	fn set_option(&mut self, update: &OptionUpdate) {
		match self.state.try_borrow_mut() {
			Ok(mut state) => state.apply(update),
			Err(_) => warn!("canvas: state busy, update dropped"),
		}
	}

	fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;

		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// The loop closure holds a handle to itself; dropping it breaks the cycle.
		self.animate.borrow_mut().take();
		for listener in self.listeners.drain(..) {
			let _ = listener.target.remove_event_listener_with_callback(
				listener.event,
				listener.callback.as_ref().unchecked_ref(),
			);
		}
		info!("canvas: chart disposed");
	}
}

impl Drop for CanvasChart {
	fn drop(&mut self) {
		self.dispose();
	}
}
