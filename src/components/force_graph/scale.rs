//! Zoom-dependent sizes for graph visuals.
//!
//! Drawing happens in graph space after the view transform, so a value meant
//! to stay a fixed number of pixels on screen has to be divided by the zoom
//! level `k`. [`ScaleBehavior`] captures the three ways a size can react to
//! zoom; [`ScaledValues`] resolves them once per frame.

use crate::chart::option::SeriesStyle;

/// How a size reacts to the zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant graph-space size. Grows when zooming in.
	World,
	/// Constant screen size in pixels.
	Screen,
	/// Graph-space size kept within screen-pixel bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Graph-space size for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Scaling rules for every graph element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node symbols.
	pub symbol: ScaleBehavior,
	/// Edge strokes.
	pub line: ScaleBehavior,
	/// Edge end decorations.
	pub edge_symbol: ScaleBehavior,
	/// Label text.
	pub label: ScaleBehavior,
	/// Extra pixels around nodes and edges that still count as a hit.
	pub hit_slack: f64,
	/// Smallest zoom factor.
	pub min_zoom: f64,
	/// Largest zoom factor.
	pub max_zoom: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			symbol: ScaleBehavior::Clamped {
				min_screen: 4.0,
				max_screen: f64::INFINITY,
			},
			line: ScaleBehavior::Screen,
			edge_symbol: ScaleBehavior::Clamped {
				min_screen: 2.0,
				max_screen: 24.0,
			},
			label: ScaleBehavior::Screen,
			hit_slack: 4.0,
			min_zoom: 0.2,
			max_zoom: 5.0,
		}
	}
}

/// Sizes resolved for one zoom level, in graph space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom factor these sizes were resolved for.
	pub k: f64,
	/// Edge stroke width.
	pub line_width: f64,
	/// Symbol sizes at the edge source and target.
	pub edge_symbol_size: [f64; 2],
	/// Node label font size.
	pub label_font_size: f64,
	/// Edge label font size.
	pub edge_label_font_size: f64,
	/// Hit test slack.
	pub hit_slack: f64,
	symbol: ScaleBehavior,
}

impl ScaledValues {
	/// Resolve every size in `style` for zoom `k`.
	pub fn new(config: &ScaleConfig, style: &SeriesStyle, k: f64) -> Self {
		let [source, target] = style.edge_symbol_size;
		Self {
			k,
			line_width: config.line.apply(style.line_style.width, k),
			edge_symbol_size: [
				config.edge_symbol.apply(source, k),
				config.edge_symbol.apply(target, k),
			],
			label_font_size: config.label.apply(style.label.font_size, k),
			edge_label_font_size: config.label.apply(style.edge_label.font_size, k),
			hit_slack: config.hit_slack / k,
			symbol: config.symbol.clone(),
		}
	}

	/// Graph-space radius of a node with the given symbol size (a diameter).
	pub fn node_radius(&self, symbol_size: f64) -> f64 {
		self.symbol.apply(symbol_size, self.k) / 2.0
	}

	/// CSS font for node labels.
	pub fn label_font(&self) -> String {
		format!("{}px sans-serif", self.label_font_size)
	}

	/// CSS font for edge labels.
	pub fn edge_label_font(&self) -> String {
		format!("{}px sans-serif", self.edge_label_font_size)
	}
}
