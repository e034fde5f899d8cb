//! 3D wireframe meshes
//!
//! This module handles:
//! - Building wireframes from vertices and edge index pairs
//! - Projecting them through a `Rotation` and `Projection` to 2D segments
//!
//! ## Coordinate System
//!
//! Screen-style axes: X right, Y down, Z away from the viewer. The projection
//! divides by `perspective + z`, so positive Z shrinks toward the centre.

use crate::geometry::{Point2D, Point3D, Projection, Rotation};

/// A 3D mesh consisting of vertices and edges
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Point3D>,
    /// Edges as pairs of vertex indices
    pub edges: Vec<(usize, usize)>,
}

impl Mesh {
    pub fn from_data(vertices: Vec<Point3D>, edges: Vec<(usize, usize)>) -> Self {
        Self { vertices, edges }
    }

    /// A cube with edge length `size`, centered at the origin
    ///
    /// Vertices 0-3 are the front face (z = -s), 4-7 the back face.
    pub fn cube(size: f64) -> Self {
        let s = size / 2.0;
        let vertices = vec![
            Point3D::new(-s, -s, -s),
            Point3D::new(s, -s, -s),
            Point3D::new(s, s, -s),
            Point3D::new(-s, s, -s),
            Point3D::new(-s, -s, s),
            Point3D::new(s, -s, s),
            Point3D::new(s, s, s),
            Point3D::new(-s, s, s),
        ];

        let edges = vec![
            // Front face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Back face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Connecting edges
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        Self::from_data(vertices, edges)
    }

    /// Cube with an inner square in the z = 0 plane
    ///
    /// `inner` is the inner square's half-size as a fraction of the cube's
    /// half-size. Diagonals join every outer corner to the inner corner with
    /// the same index modulo 4, and are only added with the inner square.
    pub fn framed_cube(size: f64, inner: f64, with_inner: bool, with_diagonals: bool) -> Self {
        let mut mesh = Self::cube(size);

        if with_inner {
            let h = size / 2.0 * inner;
            let base = mesh.vertices.len();
            mesh.vertices.extend([
                Point3D::new(-h, -h, 0.0),
                Point3D::new(h, -h, 0.0),
                Point3D::new(h, h, 0.0),
                Point3D::new(-h, h, 0.0),
            ]);
            for i in 0..4 {
                mesh.edges.push((base + i, base + (i + 1) % 4));
            }

            if with_diagonals {
                for outer in 0..8 {
                    mesh.edges.push((outer, base + outer % 4));
                }
            }
        }

        mesh
    }

    /// Rotate and project every edge to a 2D segment
    pub fn project(&self, rotation: &Rotation, projection: &Projection) -> Vec<(Point2D, Point2D)> {
        let projected: Vec<Point2D> = self
            .vertices
            .iter()
            .map(|v| projection.project_rotated(rotation, v).point())
            .collect();

        self.edges
            .iter()
            .filter(|&&(a, b)| a < projected.len() && b < projected.len())
            .map(|&(a, b)| (projected[a], projected[b]))
            .collect()
    }
}
