//! Greedy label placement with overlap hiding.

/// Screen-space box occupied by a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelRect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl LabelRect {
	/// Box for text of `width` x `height` centered horizontally on `cx`, top at `top`.
	pub fn centered(cx: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			x: cx - width / 2.0,
			y: top,
			width,
			height,
		}
	}

	/// Whether the two boxes overlap.
	pub fn intersects(&self, other: &LabelRect) -> bool {
		self.x < other.x + other.width
			&& other.x < self.x + self.width
			&& self.y < other.y + other.height
			&& other.y < self.y + self.height
	}
}

/// Decide which labels to draw.
///
/// Labels are placed in order, `first` (usually the hovered node) ahead of the
/// rest. With `hide_overlap` a label is skipped when it would overlap one that
/// is already placed; otherwise every label is shown.
pub fn place_labels(rects: &[LabelRect], first: Option<usize>, hide_overlap: bool) -> Vec<bool> {
	if !hide_overlap {
		return vec![true; rects.len()];
	}

	let first = first.filter(|&i| i < rects.len());
	let order = first
		.into_iter()
		.chain((0..rects.len()).filter(|&i| Some(i) != first));

	let mut visible = vec![false; rects.len()];
	let mut placed: Vec<LabelRect> = Vec::with_capacity(rects.len());
	for i in order {
		let rect = rects[i];
		if placed.iter().all(|p| !p.intersects(&rect)) {
			placed.push(rect);
			visible[i] = true;
		}
	}
	visible
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rect(x: f64) -> LabelRect {
		LabelRect::centered(x, 0.0, 40.0, 12.0)
	}

	#[test]
	fn touching_edges_do_not_overlap() {
		assert!(!rect(0.0).intersects(&rect(40.0)));
		assert!(rect(0.0).intersects(&rect(39.0)));
	}

	#[test]
	fn later_overlapping_labels_are_hidden() {
		let rects = [rect(0.0), rect(10.0), rect(100.0)];
		assert_eq!(place_labels(&rects, None, true), vec![true, false, true]);
	}

	#[test]
	fn priority_label_wins_the_overlap() {
		let rects = [rect(0.0), rect(10.0), rect(100.0)];
		assert_eq!(place_labels(&rects, Some(1), true), vec![false, true, true]);
	}

	#[test]
	fn everything_shows_without_overlap_hiding() {
		let rects = [rect(0.0), rect(0.0)];
		assert_eq!(place_labels(&rects, None, false), vec![true, true]);
	}

	#[test]
	fn out_of_range_priority_is_ignored() {
		let rects = [rect(0.0)];
		assert_eq!(place_labels(&rects, Some(7), true), vec![true]);
	}
}
