//! Mesh representation and procedural primitives
//!
//! Pure geometry data with no graphics-API dependencies; uploading vertex
//! data to the GPU is the render backend's concern.

use crate::foundation::math::constants::{PI, TAU};

/// 3D vertex with position, normal, and texture coordinate.
///
/// `#[repr(C)]` keeps the memory layout stable for backends that upload the
/// vertex array directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertex and index data
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Whether the mesh has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit quad centered at the origin on the XY plane, facing +Z.
    ///
    /// Scaled and rotated per instance, this is the building block for the
    /// skybox walls.
    pub fn quad() -> Self {
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex::new([-0.5, -0.5, 0.0], normal, [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.0], normal, [1.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.0], normal, [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, 0.0], normal, [0.0, 1.0]),
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];
        Self::new(vertices, indices)
    }

    /// Unit cube centered at the origin, 24 vertices so each face carries
    /// its own normal and a full texture tile
    pub fn cube() -> Self {
        // (normal, four corners in CCW order viewed from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, -1.0],
                [
                    [-0.5, -0.5, -0.5],
                    [0.5, -0.5, -0.5],
                    [0.5, 0.5, -0.5],
                    [-0.5, 0.5, -0.5],
                ],
            ),
            (
                [0.0, 0.0, 1.0],
                [
                    [-0.5, -0.5, 0.5],
                    [0.5, -0.5, 0.5],
                    [0.5, 0.5, 0.5],
                    [-0.5, 0.5, 0.5],
                ],
            ),
            (
                [-1.0, 0.0, 0.0],
                [
                    [-0.5, -0.5, 0.5],
                    [-0.5, -0.5, -0.5],
                    [-0.5, 0.5, -0.5],
                    [-0.5, 0.5, 0.5],
                ],
            ),
            (
                [1.0, 0.0, 0.0],
                [
                    [0.5, -0.5, -0.5],
                    [0.5, -0.5, 0.5],
                    [0.5, 0.5, 0.5],
                    [0.5, 0.5, -0.5],
                ],
            ),
            (
                [0.0, -1.0, 0.0],
                [
                    [-0.5, -0.5, 0.5],
                    [0.5, -0.5, 0.5],
                    [0.5, -0.5, -0.5],
                    [-0.5, -0.5, -0.5],
                ],
            ),
            (
                [0.0, 1.0, 0.0],
                [
                    [-0.5, 0.5, -0.5],
                    [0.5, 0.5, -0.5],
                    [0.5, 0.5, 0.5],
                    [-0.5, 0.5, 0.5],
                ],
            ),
        ];

        let tex_coords: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            for (corner, tex_coord) in corners.iter().zip(tex_coords.iter()) {
                vertices.push(Vertex::new(*corner, normal, *tex_coord));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self::new(vertices, indices)
    }

    /// UV sphere of unit radius built from latitude stacks and longitude
    /// slices
    pub fn uv_sphere(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for stack in 0..=stacks {
            let v = stack as f32 / stacks as f32;
            let phi = v * PI;
            for slice in 0..=slices {
                let u = slice as f32 / slices as f32;
                let theta = u * TAU;

                let x = phi.sin() * theta.cos();
                let y = phi.cos();
                let z = phi.sin() * theta.sin();

                vertices.push(Vertex::new([x, y, z], [x, y, z], [u, 1.0 - v]));
            }
        }

        let ring = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * ring + slice;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_shape() {
        let quad = Mesh::quad();
        assert_eq!(quad.vertices.len(), 4);
        assert_eq!(quad.triangle_count(), 2);
        assert!(quad.indices.iter().all(|&i| (i as usize) < quad.vertices.len()));
    }

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        // Every face normal is unit length and axis-aligned
        for vertex in &cube.vertices {
            let [x, y, z] = vertex.normal;
            assert_eq!(x.abs() + y.abs() + z.abs(), 1.0);
        }
    }

    #[test]
    fn test_uv_sphere_on_unit_radius() {
        let sphere = Mesh::uv_sphere(16, 8);
        assert!(!sphere.is_empty());
        for vertex in &sphere.vertices {
            let [x, y, z] = vertex.position;
            let radius = (x * x + y * y + z * z).sqrt();
            assert!((radius - 1.0).abs() < 1e-5, "vertex off the sphere: {radius}");
        }
        assert!(sphere.indices.iter().all(|&i| (i as usize) < sphere.vertices.len()));
    }

    #[test]
    fn test_empty_mesh() {
        assert!(Mesh::default().is_empty());
        assert!(!Mesh::cube().is_empty());
    }
}
