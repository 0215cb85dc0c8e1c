use log::{debug, info};

use super::shapes::{Edge, Node, NodeOverrides, Shape, create_edge, create_node};
use super::types::{Point, ShapeId};

/// Ordered, identity-keyed store of nodes and edges.
///
/// Iteration follows insertion order. Edges only ever reference nodes that
/// are present: `add_edge` refuses dangling endpoints and `remove` cascades
/// from a node to its incident edges.
#[derive(Clone, Debug, Default)]
pub struct DiagramModel {
	shapes: Vec<(ShapeId, Shape)>,
	next_id: u64,
}

impl DiagramModel {
	/// An empty diagram.
	pub fn new() -> Self {
		Self::default()
	}

	/// The demonstration diagram shown on a fresh canvas.
	pub fn seeded() -> Self {
		let mut model = Self::new();
		let first = model.add_node(create_node(
			Point::new(50.0, 70.0),
			NodeOverrides {
				label: Some("Create a Node!".into()),
				font_size: Some(18.0),
				small_caps: Some(true),
				..Default::default()
			},
		));
		let second = model.add_node(create_node(Point::new(250.0, 250.0), NodeOverrides::default()));
		model.add_edge(create_edge("Or a link!", first, second));
		model
	}

	fn allocate(&mut self) -> ShapeId {
		self.next_id += 1;
		ShapeId(self.next_id)
	}

	/// Appends a node under a fresh id.
	pub fn add_node(&mut self, node: Node) -> ShapeId {
		let id = self.allocate();
		info!("node {id} added at ({}, {})", node.position.x, node.position.y);
		self.shapes.push((id, Shape::Node(node)));
		id
	}

	/// Returns `None` without inserting when either endpoint is not a node in
	/// this model.
	pub fn add_edge(&mut self, edge: Edge) -> Option<ShapeId> {
		if self.node(edge.source).is_none() || self.node(edge.target).is_none() {
			debug!("edge {} -> {} rejected: missing endpoint", edge.source, edge.target);
			return None;
		}
		let id = self.allocate();
		info!("edge {id} added: {} -> {}", edge.source, edge.target);
		self.shapes.push((id, Shape::Edge(edge)));
		Some(id)
	}

	/// Removes a shape and, for nodes, every edge attached to it. Returns the
	/// ids actually removed (empty when `id` is unknown).
	pub fn remove(&mut self, id: ShapeId) -> Vec<ShapeId> {
		let Some(shape) = self.get(id) else {
			return Vec::new();
		};
		let is_node = shape.as_node().is_some();

		let mut removed = Vec::new();
		self.shapes.retain(|(sid, shape)| {
			let gone = *sid == id
				|| (is_node && shape.as_edge().is_some_and(|edge| edge.touches(id)));
			if gone {
				removed.push(*sid);
			}
			!gone
		});
		info!("removed {removed:?}");
		removed
	}

	/// Looks up any shape by id.
	pub fn get(&self, id: ShapeId) -> Option<&Shape> {
		self.shapes.iter().find(|(sid, _)| *sid == id).map(|(_, shape)| shape)
	}

	/// Whether `id` is present.
	pub fn contains(&self, id: ShapeId) -> bool {
		self.get(id).is_some()
	}

	/// The node with this id; `None` for edges and unknown ids.
	pub fn node(&self, id: ShapeId) -> Option<&Node> {
		self.get(id).and_then(Shape::as_node)
	}

	/// Mutable counterpart of [`DiagramModel::node`].
	pub fn node_mut(&mut self, id: ShapeId) -> Option<&mut Node> {
		self.shapes
			.iter_mut()
			.find(|(sid, _)| *sid == id)
			.and_then(|(_, shape)| shape.as_node_mut())
	}

	/// All shapes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
		self.shapes.iter().map(|(id, shape)| (*id, shape))
	}

	/// Nodes only, in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = (ShapeId, &Node)> {
		self.iter().filter_map(|(id, shape)| shape.as_node().map(|node| (id, node)))
	}

	/// Edges only, in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = (ShapeId, &Edge)> {
		self.iter().filter_map(|(id, shape)| shape.as_edge().map(|edge| (id, edge)))
	}

	/// Number of shapes of either kind.
	pub fn len(&self) -> usize {
		self.shapes.len()
	}

	/// True when the diagram holds no shapes.
	pub fn is_empty(&self) -> bool {
		self.shapes.is_empty()
	}

	/// The node currently in edit mode, if any.
	pub fn editing_node(&self) -> Option<ShapeId> {
		self.nodes().find(|(_, node)| node.is_editing()).map(|(id, _)| id)
	}

	/// Topmost node whose box contains the model-space point.
	pub fn node_at(&self, p: Point) -> Option<ShapeId> {
		self.nodes()
			.filter(|(_, node)| node.bounds().contains(p))
			.last()
			.map(|(id, _)| id)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn node_at(x: f64, y: f64) -> Node {
		create_node(Point::new(x, y), NodeOverrides::default())
	}

	#[test]
	fn seeded_has_two_nodes_and_a_link() {
		let model = DiagramModel::seeded();
		let nodes: Vec<_> = model.nodes().collect();
		let edges: Vec<_> = model.edges().collect();
		assert_eq!(nodes.len(), 2);
		assert_eq!(edges.len(), 1);

		let (first, a) = nodes[0];
		let (second, b) = nodes[1];
		assert_eq!(a.label, "Create a Node!");
		assert_eq!(a.style.font_size, 18.0);
		assert!(a.style.small_caps);
		assert_eq!(a.position, Point::new(50.0, 70.0));
		assert_eq!(b.position, Point::new(250.0, 250.0));
		assert_eq!(b.label, "");

		let (_, link) = edges[0];
		assert_eq!(link.label, "Or a link!");
		assert_eq!((link.source, link.target), (first, second));
	}

	#[test]
	fn ids_are_unique_and_iteration_is_stable() {
		let mut model = DiagramModel::new();
		let a = model.add_node(node_at(0.0, 0.0));
		let b = model.add_node(node_at(10.0, 0.0));
		let c = model.add_node(node_at(20.0, 0.0));
		assert_ne!(a, b);
		model.remove(b);
		let d = model.add_node(node_at(30.0, 0.0));
		assert_ne!(d, b);
		let order: Vec<_> = model.iter().map(|(id, _)| id).collect();
		assert_eq!(order, vec![a, c, d]);
	}

	#[test]
	fn edge_with_missing_endpoint_is_rejected() {
		let mut model = DiagramModel::new();
		let a = model.add_node(node_at(0.0, 0.0));
		assert_eq!(model.add_edge(create_edge("x", a, ShapeId(99))), None);
		assert_eq!(model.len(), 1);
	}

	#[test]
	fn edge_cannot_target_another_edge() {
		let mut model = DiagramModel::new();
		let a = model.add_node(node_at(0.0, 0.0));
		let b = model.add_node(node_at(200.0, 0.0));
		let link = model.add_edge(create_edge("", a, b)).unwrap();
		assert_eq!(model.add_edge(create_edge("", a, link)), None);
	}

	#[test]
	fn removing_node_cascades_to_incident_edges() {
		let mut model = DiagramModel::new();
		let a = model.add_node(node_at(0.0, 0.0));
		let b = model.add_node(node_at(200.0, 0.0));
		let c = model.add_node(node_at(400.0, 0.0));
		let ab = model.add_edge(create_edge("", a, b)).unwrap();
		let bc = model.add_edge(create_edge("", b, c)).unwrap();
		let ac = model.add_edge(create_edge("", a, c)).unwrap();

		let removed = model.remove(b);
		assert_eq!(removed, vec![b, ab, bc]);
		assert!(model.contains(ac));
		assert!(model.edges().all(|(_, e)| model.contains(e.source) && model.contains(e.target)));
	}

	#[test]
	fn removing_edge_leaves_nodes() {
		let mut model = DiagramModel::seeded();
		let (link, _) = model.edges().next().unwrap();
		assert_eq!(model.remove(link), vec![link]);
		assert_eq!(model.nodes().count(), 2);
		assert!(model.remove(link).is_empty());
	}

	#[test]
	fn node_at_prefers_topmost() {
		let mut model = DiagramModel::new();
		let _under = model.add_node(node_at(0.0, 0.0));
		let over = model.add_node(node_at(100.0, 30.0));
		assert_eq!(model.node_at(Point::new(120.0, 40.0)), Some(over));
		assert_eq!(model.node_at(Point::new(500.0, 500.0)), None);
	}
}
