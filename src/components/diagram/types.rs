use std::collections::HashMap;

use thiserror::Error;

use crate::mindmap::DIAGRAM_HEADER;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// The renderer could not draw a description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
	/// No nodes declared.
	#[error("diagram declares no nodes")]
	EmptyDiagram,
	/// A line is neither a header, a node nor an edge.
	#[error("syntax error on line {line}: {text}")]
	Syntax {
		/// 1-based line number.
		line: usize,
		/// Offending line.
		text: String,
	},
	/// The browser refused a drawing surface.
	#[error("canvas unavailable: {0}")]
	Canvas(String),
}

impl GraphData {
	/// Parse a `graph TD` description: `id["label"]` node declarations and
	/// `a --> b` or `a -->|"label"| b` edges. Repeated declarations keep the
	/// first label. Edges must reference declared nodes.
	pub fn from_description(text: &str) -> Result<Self, RenderError> {
		let mut lines = text
			.lines()
			.enumerate()
			.map(|(i, l)| (i + 1, l.trim()))
			.filter(|(_, l)| !l.is_empty());

		match lines.next() {
			Some((_, header)) if header == DIAGRAM_HEADER => {}
			Some((line, text)) => return Err(syntax(line, text)),
			None => return Err(RenderError::EmptyDiagram),
		}

		let mut data = GraphData::default();
		let mut declared: HashMap<&str, usize> = HashMap::new();
		for (line, text) in lines {
			if let Some((id, label)) = parse_node(text) {
				declared.entry(id).or_insert_with(|| {
					data.nodes.push(GraphNode {
						id: id.to_string(),
						label: label.to_string(),
					});
					data.nodes.len() - 1
				});
			} else if let Some((source, label, target)) = parse_edge(text) {
				if !declared.contains_key(source) || !declared.contains_key(target) {
					return Err(syntax(line, text));
				}
				data.links.push(GraphLink {
					source: source.to_string(),
					target: target.to_string(),
					label: label.map(str::to_string),
				});
			} else {
				return Err(syntax(line, text));
			}
		}

		if data.nodes.is_empty() {
			return Err(RenderError::EmptyDiagram);
		}
		Ok(data)
	}
}

fn syntax(line: usize, text: &str) -> RenderError {
	RenderError::Syntax {
		line,
		text: text.to_string(),
	}
}

fn is_id(s: &str) -> bool {
	!s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn parse_node(line: &str) -> Option<(&str, &str)> {
	let (id, rest) = line.split_once("[\"")?;
	let label = rest.strip_suffix("\"]")?;
	(is_id(id) && !label.contains('"')).then_some((id, label))
}

fn parse_edge(line: &str) -> Option<(&str, Option<&str>, &str)> {
	let (source, rest) = line.split_once(" -->")?;
	let (label, target) = match rest.strip_prefix("|\"") {
		Some(labeled) => {
			let (label, target) = labeled.split_once("\"|")?;
			(Some(label), target)
		}
		None => (None, rest),
	};
	let (source, target) = (source.trim(), target.trim());
	(is_id(source) && is_id(target)).then_some((source, label, target))
}
