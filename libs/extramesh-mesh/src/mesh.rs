//! # Mesh Data Structure
//!
//! Polygon mesh representation: an ordered vertex list and an ordered list
//! of polygon faces indexing into it.

use std::collections::HashSet;

use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// A polygon face: vertex indices in winding order.
///
/// The normal follows the right-hand rule over the winding.
pub type Face = Vec<u32>;

/// A polygon mesh with vertices and faces.
///
/// Generators only ever append, so a vertex's index is its insertion
/// position. All coordinates are f64.
///
/// # Example
///
/// ```rust
/// use extramesh_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![0, 1, 2]);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Polygon faces (3 or more indices each)
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Builds a mesh from raw parts, checking the index invariants.
    ///
    /// # Example
    ///
    /// ```rust
    /// use extramesh_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let result = Mesh::from_parts(vec![DVec3::ZERO], vec![vec![0, 1, 2]]);
    /// assert!(result.is_err());
    /// ```
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Splits the mesh into its vertex and face lists.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Appends several vertices at once, keeping their order.
    pub fn extend_vertices(&mut self, vertices: impl IntoIterator<Item = DVec3>) {
        self.vertices.extend(vertices);
    }

    /// Adds a polygon face.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Appends several faces at once (e.g. the output of a bridge).
    pub fn extend_faces(&mut self, faces: impl IntoIterator<Item = Face>) {
        self.faces.extend(faces);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> &[u32] {
        &self.faces[index]
    }

    /// Reverses the winding of every face.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Scales every vertex uniformly about the origin.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            *v *= factor;
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Mean position of a face's vertices.
    pub fn face_centroid(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let sum: DVec3 = face.iter().map(|&i| self.vertex(i)).sum();
        sum / face.len() as f64
    }

    /// Unit normal of a face using Newell's method.
    ///
    /// Robust for non-planar and non-convex polygons. Returns zero for a
    /// degenerate face.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let mut normal = DVec3::ZERO;
        for (k, &i) in face.iter().enumerate() {
            let current = self.vertex(i);
            let next = self.vertex(face[(k + 1) % face.len()]);
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.normalize_or_zero()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for face in &self.faces {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }

    /// Returns true if every directed edge appears exactly once and is
    /// matched by its reverse: a closed, consistently wound surface.
    pub fn is_closed_manifold(&self) -> bool {
        let mut directed = HashSet::new();
        for face in &self.faces {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                if !directed.insert((a, b)) {
                    return false;
                }
            }
        }
        directed.iter().all(|&(a, b)| directed.contains(&(b, a)))
    }

    /// Splits every polygon into a triangle fan around its first vertex.
    ///
    /// Generated faces are convex, so the fan preserves the surface.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.faces.len() * 2);
        for face in &self.faces {
            for k in 1..face.len().saturating_sub(1) {
                triangles.push([face[0], face[k], face[k + 1]]);
            }
        }
        triangles
    }

    /// Exports vertices as a flattened f32 array for GPU upload.
    ///
    /// Returns `[x, y, z, x, y, z, ...]`.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - Every face has at least three distinct indices
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();

        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }

            let distinct: HashSet<u32> = face.iter().copied().collect();
            if distinct.len() < 3 {
                return Err(MeshError::degenerate(
                    face_index,
                    format!("{} distinct vertices, at least 3 required", distinct.len()),
                ));
            }
        }

        Ok(())
    }

    /// Returns true if every vertex lies at `radius` from the origin.
    pub fn is_on_sphere(&self, radius: f64, tolerance: f64) -> bool {
        self.vertices
            .iter()
            .all(|v| (v.length() - radius).abs() <= tolerance.max(EPSILON))
    }
}

/// Returns copies of `faces` with every winding reversed.
///
/// # Example
///
/// ```rust
/// use extramesh_mesh::flipped_faces;
///
/// assert_eq!(flipped_faces(&[vec![0, 1, 2]]), vec![vec![2, 1, 0]]);
/// ```
pub fn flipped_faces(faces: &[Face]) -> Vec<Face> {
    faces
        .iter()
        .map(|face| face.iter().rev().copied().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
        mesh.add_face(vec![0, 1, 2, 3]);
        mesh
    }

    fn tetrahedron() -> Mesh {
        Mesh::from_parts(
            vec![
                DVec3::new(1.0, 1.0, 1.0),
                DVec3::new(1.0, -1.0, -1.0),
                DVec3::new(-1.0, 1.0, -1.0),
                DVec3::new(-1.0, -1.0, 1.0),
            ],
            vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_face(vec![0, 1, 2]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { face: 0, index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_repeated_index() {
        let mut mesh = unit_square();
        mesh.add_face(vec![0, 1, 1, 0]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::DegenerateFace { face: 1, .. })
        ));
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let mut mesh = unit_square();
        assert_relative_eq!(mesh.face_normal(0).z, 1.0);
        mesh.flip_normals();
        assert_relative_eq!(mesh.face_normal(0).z, -1.0);
        assert_eq!(mesh.face(0), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_face_centroid() {
        let mesh = unit_square();
        assert_eq!(mesh.face_centroid(0), DVec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_tetrahedron_is_closed() {
        let mesh = tetrahedron();
        assert!(mesh.is_closed_manifold());
        assert_eq!(mesh.edge_count(), 6);
    }

    #[test]
    fn test_open_mesh_is_not_closed() {
        assert!(!unit_square().is_closed_manifold());
    }

    #[test]
    fn test_inconsistent_winding_is_not_closed() {
        let (vertices, mut faces) = tetrahedron().into_parts();
        faces[0].reverse();
        let mesh = Mesh::from_parts(vertices, faces).unwrap();
        assert!(!mesh.is_closed_manifold());
    }

    #[test]
    fn test_triangulate_fan() {
        let mesh = unit_square();
        assert_eq!(mesh.triangulate(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_scale_and_sphere_check() {
        let mut mesh = tetrahedron();
        let radius = 3.0_f64.sqrt();
        assert!(mesh.is_on_sphere(radius, 1e-12));
        mesh.scale(2.0);
        assert!(mesh.is_on_sphere(2.0 * radius, 1e-12));
    }

    #[test]
    fn test_vertices_f32() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices_f32(), vec![1.0f32, 2.0, 3.0]);
    }
}
