//! Edge geometry in graph space.
//!
//! Edges are quadratic curves whose control point is pushed sideways by
//! `curveness` times the edge length. The sign depends on direction, so `a -> b`
//! and `b -> a` bend to opposite sides and stay distinguishable.

/// A point in graph space.
pub type Point = (f64, f64);

const CURVE_SAMPLES: usize = 24;
const BISECT_STEPS: usize = 20;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
	(b.0 - a.0).hypot(b.1 - a.1)
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	if len_sq < f64::EPSILON {
		return distance(p, a);
	}
	let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
	distance(p, (a.0 + t * dx, a.1 + t * dy))
}

/// Quadratic Bézier edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
	/// Where the curve begins.
	pub start: Point,
	/// Control point pulling the curve sideways.
	pub control: Point,
	/// Where the curve ends.
	pub end: Point,
}

impl Curve {
	/// Curve from `a` to `b`. Zero curveness gives a straight line.
	pub fn between(a: Point, b: Point, curveness: f64) -> Self {
		let control = (
			(a.0 + b.0) / 2.0 - (a.1 - b.1) * curveness,
			(a.1 + b.1) / 2.0 - (b.0 - a.0) * curveness,
		);
		Self {
			start: a,
			control,
			end: b,
		}
	}

	/// Point at parameter `t` in `0..=1`.
	pub fn point(&self, t: f64) -> Point {
		let u = 1.0 - t;
		(
			u * u * self.start.0 + 2.0 * u * t * self.control.0 + t * t * self.end.0,
			u * u * self.start.1 + 2.0 * u * t * self.control.1 + t * t * self.end.1,
		)
	}

	/// Unit direction of travel at `t`, or `(0, 0)` for a degenerate curve.
	pub fn direction(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let dx = 2.0 * u * (self.control.0 - self.start.0) + 2.0 * t * (self.end.0 - self.control.0);
		let dy = 2.0 * u * (self.control.1 - self.start.1) + 2.0 * t * (self.end.1 - self.control.1);
		let len = dx.hypot(dy);
		if len < f64::EPSILON {
			(0.0, 0.0)
		} else {
			(dx / len, dy / len)
		}
	}

	/// The piece of this curve between parameters `t0` and `t1`.
	pub fn section(&self, t0: f64, t1: f64) -> Self {
		let blossom = |u: f64, v: f64| {
			let (a, b, c) = ((1.0 - u) * (1.0 - v), (1.0 - u) * v + u * (1.0 - v), u * v);
			(
				a * self.start.0 + b * self.control.0 + c * self.end.0,
				a * self.start.1 + b * self.control.1 + c * self.end.1,
			)
		};
		Self {
			start: self.point(t0),
			control: blossom(t0, t1),
			end: self.point(t1),
		}
	}

	/// Cut the curve where it leaves a circle of `start_radius` around its start
	/// and where it enters one of `end_radius` around its end.
	///
	/// `None` when the two circles leave nothing to draw.
	pub fn trimmed(&self, start_radius: f64, end_radius: f64) -> Option<Self> {
		let t0 = self.exit_param(self.start, start_radius, false);
		let t1 = self.exit_param(self.end, end_radius, true);
		(t0 < t1).then(|| self.section(t0, t1))
	}

	/// Parameter where the curve crosses the circle around `center`, searched from
	/// the start (or from the end when `from_end`).
	fn exit_param(&self, center: Point, radius: f64, from_end: bool) -> f64 {
		if radius <= 0.0 {
			return if from_end { 1.0 } else { 0.0 };
		}
		let (mut inside, mut outside) = if from_end { (1.0, 0.0) } else { (0.0, 1.0) };
		if distance(self.point(outside), center) <= radius {
			return outside;
		}
		for _ in 0..BISECT_STEPS {
			let mid = (inside + outside) / 2.0;
			if distance(self.point(mid), center) < radius {
				inside = mid;
			} else {
				outside = mid;
			}
		}
		(inside + outside) / 2.0
	}

	/// Approximate distance from `p` to the curve, measured against a polyline.
	pub fn distance_to(&self, p: Point) -> f64 {
		let mut prev = self.start;
		let mut best = f64::INFINITY;
		for i in 1..=CURVE_SAMPLES {
			let next = self.point(i as f64 / CURVE_SAMPLES as f64);
			best = best.min(distance_to_segment(p, prev, next));
			prev = next;
		}
		best
	}
}

/// A self-loop drawn as a circle sitting on top of its node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfLoop {
	/// Center of the loop circle.
	pub center: Point,
	/// Radius of the loop circle.
	pub radius: f64,
}

impl SelfLoop {
	/// Loop resting on top of a node of `node_radius`.
	pub fn above(node: Point, node_radius: f64) -> Self {
		let radius = (node_radius * 0.6).max(6.0);
		Self {
			center: (node.0, node.1 - node_radius - radius * 0.6),
			radius,
		}
	}

	/// Distance from `p` to the loop outline.
	pub fn distance_to(&self, p: Point) -> f64 {
		(distance(p, self.center) - self.radius).abs()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn opposite_directions_bend_to_opposite_sides() {
		let forward = Curve::between((0.0, 0.0), (100.0, 0.0), 0.2);
		let back = Curve::between((100.0, 0.0), (0.0, 0.0), 0.2);

		assert!(close(forward.control.0, 50.0));
		assert!(close(forward.control.1, -20.0));
		assert!(close(back.control.1, 20.0));
	}

	#[test]
	fn straight_curve_is_a_segment() {
		let curve = Curve::between((0.0, 0.0), (10.0, 10.0), 0.0);
		let (x, y) = curve.point(0.5);
		assert!(close(x, 5.0) && close(y, 5.0));
		assert!(close(curve.distance_to((0.0, 10.0)), 50f64.sqrt()));
	}

	#[test]
	fn section_matches_the_original_curve() {
		let curve = Curve::between((0.0, 0.0), (80.0, 40.0), 0.3);
		let part = curve.section(0.25, 0.75);

		let (ax, ay) = part.point(0.5);
		let (bx, by) = curve.point(0.5);
		assert!(close(ax, bx) && close(ay, by));
		assert_eq!(curve.section(0.0, 1.0), curve);
	}

	#[test]
	fn trimming_stops_at_node_borders() {
		let curve = Curve::between((0.0, 0.0), (200.0, 0.0), 0.2);
		let trimmed = curve.trimmed(15.0, 20.0).unwrap();

		assert!((distance(trimmed.start, curve.start) - 15.0).abs() < 1e-3);
		assert!((distance(trimmed.end, curve.end) - 20.0).abs() < 1e-3);
	}

	#[test]
	fn overlapping_nodes_leave_nothing_to_draw() {
		let curve = Curve::between((0.0, 0.0), (10.0, 0.0), 0.2);
		assert_eq!(curve.trimmed(15.0, 15.0), None);
	}

	#[test]
	fn direction_at_end_points_along_the_edge() {
		let curve = Curve::between((0.0, 0.0), (100.0, 0.0), 0.0);
		let (dx, dy) = curve.direction(1.0);
		assert!(close(dx, 1.0) && close(dy, 0.0));
	}

	#[test]
	fn self_loop_sits_above_the_node() {
		let loop_ = SelfLoop::above((0.0, 0.0), 15.0);
		assert!(loop_.center.1 < -15.0);
		let top = (loop_.center.0, loop_.center.1 - loop_.radius);
		assert!(close(loop_.distance_to(top), 0.0));
	}
}
