//! # Vertex Stars
//!
//! For every vertex, the ring of neighbouring vertices and incident faces in
//! counter-clockwise order seen from outside. Truncation reads corner
//! positions off the neighbour ring; the dual reads its faces off the face
//! ring.
//!
//! Each face contributes one link per corner: "in face `f`, this vertex is
//! followed by `next` and preceded by `prev`". Walking `next → prev` from
//! the first link recorded for a vertex visits its whole star.

use extramesh_mesh::Mesh;

/// Index into a slice with wrap-around, so `-1` is the last element.
#[inline]
pub(crate) fn cyclic<T: Copy>(items: &[T], index: isize) -> T {
    items[index.rem_euclid(items.len() as isize) as usize]
}

#[derive(Debug, Clone, Copy)]
struct Link {
    next: u32,
    prev: u32,
    face: usize,
}

/// Ordered neighbourhood of one vertex.
///
/// `faces[j]` is the face between `neighbours[j - 1]` and `neighbours[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexStar {
    /// Neighbouring vertices, counter-clockwise.
    pub neighbours: Vec<u32>,
    /// Incident faces, counter-clockwise.
    pub faces: Vec<usize>,
    valence: usize,
    closed: bool,
}

impl VertexStar {
    /// Number of steps in the ring.
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Position of `vertex` in the neighbour ring.
    pub fn neighbour_index(&self, vertex: u32) -> Option<usize> {
        self.neighbours.iter().position(|&n| n == vertex)
    }

    /// Position of `face` in the face ring.
    pub fn face_index(&self, face: usize) -> Option<usize> {
        self.faces.iter().position(|&f| f == face)
    }

    /// True when the walk returned to its start after visiting every link
    /// of the vertex, i.e. the vertex is a proper disc of at least three
    /// faces.
    pub fn is_complete(&self) -> bool {
        self.closed && self.valence >= 3 && self.neighbours.len() == self.valence
    }
}

/// Builds the star of every vertex of `mesh`.
///
/// Faces must index valid vertices. On a closed, consistently wound mesh
/// every star is complete; otherwise the affected stars stop early and
/// report it through [`VertexStar::is_complete`].
pub fn vertex_stars(mesh: &Mesh) -> Vec<VertexStar> {
    let mut links: Vec<Vec<Link>> = vec![Vec::new(); mesh.vertex_count()];

    for (face_index, face) in mesh.faces().iter().enumerate() {
        for j in 0..face.len() as isize {
            let vertex = cyclic(face, j - 1);
            links[vertex as usize].push(Link {
                next: cyclic(face, j),
                prev: cyclic(face, j - 2),
                face: face_index,
            });
        }
    }

    links.iter().map(|links| walk(links)).collect()
}

fn walk(links: &[Link]) -> VertexStar {
    let mut star = VertexStar {
        valence: links.len(),
        ..VertexStar::default()
    };
    let Some(first) = links.first() else {
        return star;
    };

    let start = first.next;
    let mut current = start;
    while star.neighbours.len() < links.len() {
        let Some(link) = links.iter().find(|link| link.next == current) else {
            break;
        };
        star.neighbours.push(link.prev);
        star.faces.push(link.face);
        current = link.prev;
        if current == start {
            star.closed = true;
            break;
        }
    }
    star
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Seed;
    use glam::DVec3;

    #[test]
    fn test_cyclic_wraps_negative() {
        let items = [10, 20, 30];
        assert_eq!(cyclic(&items, -1), 30);
        assert_eq!(cyclic(&items, -2), 20);
        assert_eq!(cyclic(&items, 3), 10);
    }

    #[test]
    fn test_seed_stars_complete() {
        for seed in Seed::ALL {
            let mesh = seed.mesh();
            let stars = vertex_stars(&mesh);
            assert_eq!(stars.len(), seed.vertex_count());
            let valence = 2 * seed.edge_count() / seed.vertex_count();
            for star in &stars {
                assert!(star.is_complete(), "{seed:?}");
                assert_eq!(star.len(), valence);
            }
        }
    }

    #[test]
    fn test_octahedron_apex_ring() {
        let stars = vertex_stars(&Seed::O8.mesh());
        // Apex 4 (+z): faces 0..4 fan around it
        let apex = &stars[4];
        assert_eq!(apex.neighbours, vec![2, 1, 3, 0]);
        assert_eq!(apex.faces, vec![0, 1, 2, 3]);
        assert_eq!(apex.neighbour_index(3), Some(2));
        assert_eq!(apex.face_index(3), Some(3));
        assert_eq!(apex.face_index(7), None);
    }

    #[test]
    fn test_ring_is_counter_clockwise_from_outside() {
        let mesh = Seed::C6.mesh();
        for (index, star) in vertex_stars(&mesh).iter().enumerate() {
            let centre = mesh.vertices()[index];
            let a = mesh.vertex(star.neighbours[0]) - centre;
            let b = mesh.vertex(star.neighbours[1]) - centre;
            assert!(a.cross(b).dot(centre) > 0.0);
        }
    }

    #[test]
    fn test_open_mesh_stars_incomplete() {
        let mut mesh = Mesh::new();
        mesh.extend_vertices([DVec3::ZERO, DVec3::X, DVec3::Y]);
        mesh.add_face(vec![0, 1, 2]);
        let stars = vertex_stars(&mesh);
        assert!(stars.iter().all(|star| !star.is_complete()));
    }

    #[test]
    fn test_isolated_vertex_has_empty_star() {
        let mut mesh = Seed::T4.mesh();
        mesh.add_vertex(DVec3::ZERO);
        let stars = vertex_stars(&mesh);
        assert!(stars[4].is_empty());
        assert!(!stars[4].is_complete());
    }
}
