use std::collections::{HashMap, HashSet, VecDeque};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Fill colour by distance from the root.
const COLORS: &[&str] = &[
	"#ff7f0e", "#1f77b4", "#2ca02c", "#9467bd", "#17becf", "#8c564b", "#e377c2", "#7f7f7f",
];

pub const NODE_RADIUS: f64 = 7.0;
pub const HIT_RADIUS: f64 = 14.0;
/// Vertical spacing between labels of parallel edges.
pub const LABEL_SPACING: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: Option<String>,
	/// Position among edges joining the same two nodes.
	pub slot: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct DiagramState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub root: Option<DefaultNodeIdx>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl DiagramState {
	/// Lay `data` out on a circle around the origin; the first node is the
	/// root and is pinned there.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 250.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let depths = depths(data);
		let mut id_to_idx = HashMap::new();
		let mut root = None;

		for (i, node) in data.nodes.iter().enumerate() {
			let depth = depths.get(node.id.as_str()).copied().unwrap_or(0);
			let is_root = i == 0;
			let (x, y) = if is_root {
				(0.0, 0.0)
			} else {
				let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
				((120.0 * angle.cos()) as f32, (120.0 * angle.sin()) as f32)
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: is_root,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: COLORS[depth % COLORS.len()].to_string(),
				},
			});
			if is_root {
				root = Some(idx);
			}
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut pair_counts: HashMap<(&str, &str), usize> = HashMap::new();
		let mut edges = Vec::new();
		for link in &data.links {
			let (Some(&source), Some(&target)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) else {
				continue;
			};
			let (a, b) = (link.source.as_str(), link.target.as_str());
			let key = if a <= b { (a, b) } else { (b, a) };
			let count = pair_counts.entry(key).or_insert(0);
			graph.add_edge(source, target, EdgeData::default());
			edges.push(EdgeInfo {
				source,
				target,
				label: link.label.clone(),
				slot: *count,
			});
			*count += 1;
		}

		Self {
			graph,
			edges,
			root,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}

/// Breadth-first distance from the first node along edge direction.
/// Nodes the root cannot reach are one level past the deepest reachable.
fn depths(data: &GraphData) -> HashMap<&str, usize> {
	let mut depths = HashMap::new();
	let Some(root) = data.nodes.first() else {
		return depths;
	};
	let mut queue = VecDeque::from([(root.id.as_str(), 0)]);
	depths.insert(root.id.as_str(), 0);
	while let Some((id, depth)) = queue.pop_front() {
		for link in data.links.iter().filter(|l| l.source == id) {
			if !depths.contains_key(link.target.as_str()) {
				depths.insert(link.target.as_str(), depth + 1);
				queue.push_back((link.target.as_str(), depth + 1));
			}
		}
	}
	let unreachable = depths.values().max().copied().unwrap_or(0) + 1;
	for node in &data.nodes {
		depths.entry(node.id.as_str()).or_insert(unreachable);
	}
	depths
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::super::types::{GraphLink, GraphNode};

	fn data(nodes: &[&str], links: &[(&str, &str, Option<&str>)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: id.to_string(),
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t, l)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
					label: l.map(str::to_string),
				})
				.collect(),
		}
	}

	fn node_info(state: &DiagramState, label: &str) -> NodeInfo {
		let mut info = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.label == label {
				info = Some(node.data.user_data.clone());
			}
		});
		info.expect("node present")
	}

	#[test]
	fn colors_follow_depth_from_root() {
		let state = DiagramState::new(
			&data(
				&["Root", "Child", "Grandchild", "Island"],
				&[("Root", "Child", None), ("Child", "Grandchild", None)],
			),
			800.0,
			600.0,
		);
		assert_eq!(node_info(&state, "Root").color, COLORS[0]);
		assert_eq!(node_info(&state, "Child").color, COLORS[1]);
		assert_eq!(node_info(&state, "Grandchild").color, COLORS[2]);
		assert_eq!(node_info(&state, "Island").color, COLORS[3]);
	}

	#[test]
	fn parallel_edges_get_distinct_label_slots() {
		let state = DiagramState::new(
			&data(
				&["A", "B"],
				&[("A", "B", Some("rel")), ("A", "B", Some("rel2")), ("B", "A", None)],
			),
			800.0,
			600.0,
		);
		let slots: Vec<usize> = state.edges.iter().map(|e| e.slot).collect();
		assert_eq!(slots, vec![0, 1, 2]);
	}

	#[test]
	fn links_to_unknown_nodes_are_dropped() {
		let state = DiagramState::new(
			&data(&["A"], &[("A", "Ghost", Some("haunts"))]),
			800.0,
			600.0,
		);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn root_sits_at_canvas_center() {
		let state = DiagramState::new(&data(&["Root", "Leaf"], &[]), 800.0, 600.0);
		assert_eq!(state.node_at_position(400.0, 300.0), state.root);
		assert_eq!(state.node_at_position(5.0, 5.0), None);
	}

	#[test]
	fn hover_collects_neighbors_both_ways() {
		let mut state = DiagramState::new(
			&data(
				&["A", "B", "C", "D"],
				&[("A", "B", None), ("C", "A", None)],
			),
			800.0,
			600.0,
		);
		let a = state.root;
		state.set_hover(a);
		assert_eq!(state.hover.neighbors.len(), 2);
		assert!(state.has_active_highlight());

		state.set_hover(None);
		assert_eq!(state.hover.prev_node, a);
		assert_eq!(state.hover.prev_neighbors.len(), 2);
		assert!(state.hover.neighbors.is_empty());
	}
}
