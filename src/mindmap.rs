//! Mindmap payload translation.
//!
//! The backend answers a mindmap query with
//!
//! ```text
//! MINDMAP_DATA:
//! source|relation|target
//! ...
//! ```
//!
//! [`translate`] turns that into a `graph TD` diagram description for the
//! diagram renderer, or a placeholder message when there is nothing to draw.
//! Malformed lines are dropped, never reported.

use std::collections::HashSet;

/// Marker that starts the relationship block.
pub const MARKER: &str = "MINDMAP_DATA:";

/// Header line of every generated description.
pub const DIAGRAM_HEADER: &str = "graph TD;";

/// One deduplicated `source -relation-> target` edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagramEdge {
	/// Source label, trimmed.
	pub source: String,
	/// Relation label, trimmed. May be empty.
	pub relation: String,
	/// Target label, trimmed.
	pub target: String,
}

impl DiagramEdge {
	/// Renderer id of the source node.
	pub fn source_id(&self) -> String {
		node_id(&self.source)
	}

	/// Renderer id of the target node.
	pub fn target_id(&self) -> String {
		node_id(&self.target)
	}
}

/// Edges in first-seen order plus their description text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagram {
	edges: Vec<DiagramEdge>,
	text: String,
}

impl Diagram {
	/// Edges in input order.
	pub fn edges(&self) -> &[DiagramEdge] {
		&self.edges
	}

	/// The `graph TD` description handed to the renderer.
	pub fn text(&self) -> &str {
		&self.text
	}
}

/// Why there is no diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placeholder {
	/// The marker is missing; `original` is the whole payload.
	InvalidFormat {
		/// Payload as received.
		original: String,
	},
	/// Nothing but blank lines after the marker.
	NoRelationships,
	/// Lines were present but none formed a usable edge.
	NoValidRelationships,
}

impl Placeholder {
	/// Text shown in place of the diagram.
	pub fn message(&self) -> String {
		match self {
			Placeholder::InvalidFormat { original } => {
				format!("Invalid mindmap format. Raw response:\n{original}")
			}
			Placeholder::NoRelationships => {
				"Mindmap generated. No relationships found for this node.".to_string()
			}
			Placeholder::NoValidRelationships => {
				"Mindmap generated. No valid relationships found in data.".to_string()
			}
		}
	}
}

/// Outcome of [`translate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MindmapView {
	/// Something to draw.
	Diagram(Diagram),
	/// Nothing to draw.
	Placeholder(Placeholder),
}

/// Translate a mindmap `result` string. Never fails.
pub fn translate(result: &str) -> MindmapView {
	let Some(at) = result.find(MARKER) else {
		return MindmapView::Placeholder(Placeholder::InvalidFormat {
			original: result.to_string(),
		});
	};

	let lines: Vec<&str> = result[at + MARKER.len()..]
		.trim()
		.lines()
		.filter(|line| !line.trim().is_empty())
		.collect();
	if lines.is_empty() {
		return MindmapView::Placeholder(Placeholder::NoRelationships);
	}

	let mut seen = HashSet::new();
	let edges: Vec<DiagramEdge> = lines
		.into_iter()
		.filter_map(parse_line)
		.filter(|edge| seen.insert(edge.clone()))
		.collect();
	if edges.is_empty() {
		return MindmapView::Placeholder(Placeholder::NoValidRelationships);
	}

	let text = describe(&edges);
	MindmapView::Diagram(Diagram { edges, text })
}

/// Render id for a label: every non-alphanumeric character becomes `_`.
pub fn node_id(label: &str) -> String {
	label
		.chars()
		.map(|c| if c.is_alphanumeric() { c } else { '_' })
		.collect()
}

/// Label text that is safe inside `"..."`.
pub fn quote_safe(label: &str) -> String {
	label.replace('"', "'")
}

fn parse_line(line: &str) -> Option<DiagramEdge> {
	let fields: Vec<&str> = line.split('|').map(str::trim).collect();
	let [source, relation, target] = fields.as_slice() else {
		return None;
	};
	if source.is_empty() || target.is_empty() {
		return None;
	}
	Some(DiagramEdge {
		source: source.to_string(),
		relation: relation.to_string(),
		target: target.to_string(),
	})
}

fn describe(edges: &[DiagramEdge]) -> String {
	let mut text = format!("{DIAGRAM_HEADER}\n");
	// distinct labels can still share an id ("a b" and "a-b")
	let mut emitted = HashSet::new();
	for edge in edges {
		let (source_id, target_id) = (edge.source_id(), edge.target_id());
		let relation = quote_safe(&edge.relation);
		if !emitted.insert((source_id.clone(), relation.clone(), target_id.clone())) {
			continue;
		}
		text.push_str(&format!("    {source_id}[\"{}\"]\n", quote_safe(&edge.source)));
		text.push_str(&format!("    {target_id}[\"{}\"]\n", quote_safe(&edge.target)));
		if relation.is_empty() {
			text.push_str(&format!("    {source_id} --> {target_id}\n"));
		} else {
			text.push_str(&format!("    {source_id} -->|\"{relation}\"| {target_id}\n"));
		}
	}
	text
}
