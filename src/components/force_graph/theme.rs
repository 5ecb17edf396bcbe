//! Visual theming for the canvas chart.
//!
//! Provides the node palette, background and tooltip colors.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha, `0..=1`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba()` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#rrggbb` or `rgb()`/`rgba()` notation. Anything else is gray.
	pub fn parse(css: &str) -> Self {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#').filter(|h| h.len() == 6 && h.is_ascii()) {
			let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(128);
			return Color::rgb(channel(0), channel(2), channel(4));
		}
		if css.starts_with("rgb") {
			let parts: Vec<&str> = css
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let channel = |i: usize| parts.get(i).and_then(|s| s.parse::<u8>().ok()).unwrap_or(128);
			let alpha = parts.get(3).and_then(|s| s.parse::<f64>().ok()).unwrap_or(1.0);
			return Color::rgba(channel(0), channel(1), channel(2), alpha);
		}
		Color::rgb(128, 128, 128)
	}
}

/// Node fill colors, assigned by node position.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Colors in cycling order.
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// The familiar nine-color chart palette.
	pub fn classic() -> Self {
		Self {
			colors: vec![
				Color::rgb(84, 112, 198),
				Color::rgb(145, 204, 117),
				Color::rgb(250, 200, 88),
				Color::rgb(238, 102, 102),
				Color::rgb(115, 192, 222),
				Color::rgb(59, 162, 114),
				Color::rgb(252, 132, 82),
				Color::rgb(154, 96, 180),
				Color::rgb(234, 124, 204),
			],
		}
	}

	/// Color for the node at `index`, cycling through the palette.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Tooltip box colors.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
	/// Text color.
	pub text: Color,
	/// Font size in pixels.
	pub font_size: f64,
	/// Space between text and outline.
	pub padding: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Node and edge label text.
	pub label_color: Color,
	/// Alpha multiplier for items outside the hovered neighbourhood.
	pub blur_alpha: f64,
	/// Tooltip box.
	pub tooltip: TooltipStyle,
	/// Node fills.
	pub palette: NodePalette,
}

impl Theme {
	/// Light theme matching the usual chart defaults.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			label_color: Color::rgb(51, 51, 51),
			blur_alpha: 0.3,
			tooltip: TooltipStyle {
				background: Color::rgba(255, 255, 255, 0.95),
				border: Color::rgb(204, 204, 204),
				text: Color::rgb(102, 102, 102),
				font_size: 14.0,
				padding: 8.0,
			},
			palette: NodePalette::classic(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
