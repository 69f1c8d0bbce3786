//! Room detection from closed loops of wall centerlines
//!
//! Wall endpoints that lie within the endpoint tolerance are snapped
//! together, walls become edges between the snapped nodes, and every simple
//! cycle up to the length bound is enumerated. Of those, the smallest loops
//! that do not sit inside an already accepted loop are rooms. Texts placed
//! inside a room name it.

use super::Wall;
use crate::entities::EntityType;
use crate::geometry::{wkt, Polygon};
use crate::notification::{NotificationCollection, NotificationType};
use crate::rules::SemanticKind;
use crate::semantic::{Properties, SemanticObject};
use crate::types::{round2, BoundingBox2D, Vector2};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Room detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Distance under which wall endpoints are the same corner
    /// (drawing units, default 50)
    pub endpoint_tolerance: f64,
    /// Longest loop searched, in nodes (default 20)
    pub max_cycle_length: usize,
    /// Smallest loop area kept (square drawing units, default 100)
    pub min_area: f64,
    /// Loop enumeration stops after this many distinct loops (default 10000)
    pub max_cycles: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            endpoint_tolerance: 50.0,
            max_cycle_length: 20,
            min_area: 100.0,
            max_cycles: 10_000,
        }
    }
}

/// An enclosed room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    /// 1-based, in ascending area order
    pub room_index: usize,
    /// First non-numeric text inside, else the first text
    pub name: Option<String>,
    /// Area in square drawing units
    pub area: f64,
    /// Area in square meters (drawing units in millimeters)
    pub area_sqm: f64,
    pub centroid: Vector2,
    pub bbox: BoundingBox2D,
    /// Loop vertices, not repeated at the end
    pub vertices: Vec<Vector2>,
    pub vertex_count: usize,
    /// Texts whose insertion point lies inside, in entity order
    pub texts_inside: Vec<String>,
}

impl Room {
    /// Output record
    pub fn to_object(&self) -> SemanticObject {
        SemanticObject::new(
            SemanticKind::Room,
            "wall_enclosure",
            Properties::Room(self.clone()),
        )
        .with_geometry(wkt::polygon(&self.vertices).ok())
    }

    /// Check whether a point lies inside the room outline
    pub fn contains(&self, point: Vector2) -> bool {
        crate::geometry::point_in_polygon(point, &self.vertices)
    }
}

/// Index of a node in the wall graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct NodeId(usize);

/// Undirected graph of snapped wall endpoints
///
/// Nodes are interned by their integer position, so the arena order is the
/// order in which walls first touch them.
#[derive(Debug, Default)]
struct WallGraph {
    positions: Vec<(i64, i64)>,
    lookup: AHashMap<(i64, i64), NodeId>,
    adjacency: Vec<Vec<NodeId>>,
}

impl WallGraph {
    fn intern(&mut self, position: (i64, i64)) -> NodeId {
        if let Some(&id) = self.lookup.get(&position) {
            return id;
        }
        let id = NodeId(self.positions.len());
        self.positions.push(position);
        self.lookup.insert(position, id);
        self.adjacency.push(Vec::new());
        id
    }

    fn add_edge(&mut self, a: (i64, i64), b: (i64, i64)) {
        let a = self.intern(a);
        let b = self.intern(b);
        self.adjacency[a.0].push(b);
        self.adjacency[b.0].push(a);
    }

    fn node_count(&self) -> usize {
        self.positions.len()
    }

    fn point(&self, id: NodeId) -> Vector2 {
        let (x, y) = self.positions[id.0];
        Vector2::new(x as f64, y as f64)
    }
}

/// Snap endpoints: each unclustered endpoint absorbs every later unclustered
/// endpoint within `tolerance`, and the cluster sits at the rounded mean
///
/// A hash grid with cells at least `tolerance` wide restricts the candidates
/// to the 3×3 neighbourhood without changing the result.
fn cluster_endpoints(points: &[Vector2], tolerance: f64) -> Vec<(i64, i64)> {
    let cell_size = tolerance.max(1.0);
    let cell = |p: Vector2| ((p.x / cell_size).floor() as i64, (p.y / cell_size).floor() as i64);

    let mut grid: AHashMap<(i64, i64), Vec<usize>> = AHashMap::new();
    for (i, p) in points.iter().enumerate() {
        grid.entry(cell(*p)).or_default().push(i);
    }

    let mut snapped = vec![(0i64, 0i64); points.len()];
    let mut used = vec![false; points.len()];
    let mut members = Vec::new();

    for i in 0..points.len() {
        if used[i] {
            continue;
        }
        used[i] = true;

        members.clear();
        let (cx, cy) = cell(points[i]);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = grid.get(&(cx.saturating_add(dx), cy.saturating_add(dy))) {
                    members.extend(bucket.iter().copied().filter(|&j| {
                        j > i && !used[j] && points[i].distance(&points[j]) <= tolerance
                    }));
                }
            }
        }
        members.sort_unstable();
        members.insert(0, i);

        let n = members.len() as f64;
        let sum = members
            .iter()
            .fold(Vector2::ZERO, |acc, &k| acc + points[k]);
        let position = ((sum.x / n).round() as i64, (sum.y / n).round() as i64);
        for &k in &members {
            used[k] = true;
            snapped[k] = position;
        }
    }
    snapped
}

fn build_graph(walls: &[Wall], tolerance: f64) -> WallGraph {
    let endpoints: Vec<Vector2> = walls.iter().flat_map(|w| [w.start, w.end]).collect();
    let snapped = cluster_endpoints(&endpoints, tolerance);

    let mut graph = WallGraph::default();
    for pair in snapped.chunks_exact(2) {
        if pair[0] != pair[1] {
            graph.add_edge(pair[0], pair[1]);
        }
    }
    graph
}

/// Depth-first enumeration of simple cycles
struct CycleSearch<'a> {
    graph: &'a WallGraph,
    max_length: usize,
    max_cycles: usize,
    found: Vec<Vec<NodeId>>,
    seen: AHashSet<Vec<NodeId>>,
    capped: bool,
}

impl<'a> CycleSearch<'a> {
    fn new(graph: &'a WallGraph, config: &RoomConfig) -> Self {
        CycleSearch {
            graph,
            max_length: config.max_cycle_length,
            max_cycles: config.max_cycles,
            found: Vec::new(),
            seen: AHashSet::new(),
            capped: false,
        }
    }

    fn run(mut self) -> (Vec<Vec<NodeId>>, bool) {
        for start in 0..self.graph.node_count() {
            if self.capped {
                break;
            }
            let start = NodeId(start);
            let mut path = vec![start];
            let mut edges = Vec::new();
            self.visit(start, start, &mut path, &mut edges);
        }
        (self.found, self.capped)
    }

    fn visit(
        &mut self,
        start: NodeId,
        current: NodeId,
        path: &mut Vec<NodeId>,
        edges: &mut Vec<(NodeId, NodeId)>,
    ) {
        if path.len() > self.max_length {
            return;
        }
        let graph = self.graph;
        for &neighbor in &graph.adjacency[current.0] {
            if self.capped {
                return;
            }
            let edge = (current.min(neighbor), current.max(neighbor));
            if edges.contains(&edge) {
                continue;
            }
            if neighbor == start && path.len() >= 3 {
                self.record(path);
                continue;
            }
            if path.contains(&neighbor) {
                continue;
            }
            path.push(neighbor);
            edges.push(edge);
            self.visit(start, neighbor, path, edges);
            path.pop();
            edges.pop();
        }
    }

    /// Keep a cycle, rotated to start at its smallest node position, unless a
    /// rotation or reversal of it was kept already
    fn record(&mut self, path: &[NodeId]) {
        let position = |id: &NodeId| self.graph.positions[id.0];
        let Some(min_at) = path
            .iter()
            .enumerate()
            .min_by_key(|(_, id)| position(*id))
            .map(|(i, _)| i)
        else {
            return;
        };
        let mut rotated = path[min_at..].to_vec();
        rotated.extend_from_slice(&path[..min_at]);

        let mut reversed = rotated.clone();
        reversed[1..].reverse();
        let key = if reversed[1..].iter().map(position).lt(rotated[1..].iter().map(position)) {
            reversed
        } else {
            rotated.clone()
        };

        if self.seen.insert(key) {
            self.found.push(rotated);
            if self.found.len() >= self.max_cycles {
                self.capped = true;
            }
        }
    }
}

/// Detect rooms enclosed by walls and name them from texts inside
///
/// Hitting the loop cap is reported as a [`NotificationType::Limit`]; the
/// loops found up to then are still used.
pub fn detect_rooms(
    walls: &[Wall],
    entities: &[EntityType],
    config: &RoomConfig,
    notifications: &mut NotificationCollection,
) -> Vec<Room> {
    if walls.is_empty() {
        return Vec::new();
    }
    let graph = build_graph(walls, config.endpoint_tolerance);
    if graph.node_count() == 0 {
        return Vec::new();
    }

    let (cycles, capped) = CycleSearch::new(&graph, config).run();
    if capped {
        notifications.notify(
            NotificationType::Limit,
            format!("room search stopped after {} loops", config.max_cycles),
        );
    }

    let mut polygons: Vec<Polygon> = cycles
        .iter()
        .filter_map(|cycle| Polygon::new(cycle.iter().map(|&id| graph.point(id)).collect()).ok())
        .collect();
    polygons.sort_by(|a, b| a.area().total_cmp(&b.area()));

    let mut accepted: Vec<Polygon> = Vec::new();
    for polygon in polygons {
        if polygon.area() < config.min_area {
            continue;
        }
        let centroid = polygon.centroid();
        if accepted.iter().any(|outer| outer.contains(centroid)) {
            continue;
        }
        accepted.push(polygon);
    }

    let texts: Vec<(String, Vector2)> = entities
        .iter()
        .filter_map(EntityType::text_content)
        .map(|(text, position)| (text.trim().to_string(), position))
        .filter(|(text, _)| !text.is_empty())
        .collect();

    let rooms: Vec<Room> = accepted
        .into_iter()
        .enumerate()
        .map(|(i, polygon)| {
            let texts_inside: Vec<String> = texts
                .iter()
                .filter(|(_, position)| polygon.contains(*position))
                .map(|(text, _)| text.clone())
                .collect();
            let area = polygon.area();
            Room {
                room_index: i + 1,
                name: room_name(&texts_inside),
                area: round2(area),
                area_sqm: round2(area / 1_000_000.0),
                centroid: polygon.centroid().rounded(),
                bbox: polygon.bounding_box().rounded(),
                vertex_count: polygon.vertex_count(),
                vertices: polygon.into_vertices().into_iter().map(|v| v.rounded()).collect(),
                texts_inside,
            }
        })
        .collect();

    debug!(loops = cycles.len(), rooms = rooms.len(), "rooms detected");
    rooms
}

/// First text that is not a bare number, else the first text
fn room_name(texts: &[String]) -> Option<String> {
    let is_number = |text: &str| {
        let digits: String = text.chars().filter(|c| !matches!(c, '.' | ',' | '-')).collect();
        !digits.is_empty() && digits.chars().all(|c| c.is_numeric())
    };
    texts
        .iter()
        .find(|t| !is_number(t))
        .or_else(|| texts.first())
        .cloned()
}
