//! Unit cube mesh shared by every drawn box
//!
//! The cube is centered at the origin with side length 1, so an instance
//! scale equal to the box's full size gives the right footprint.

use boxshot_math::Vec3;

use crate::pipeline::Vertex;

/// Number of indices in the cube mesh (6 faces, 2 triangles each)
pub const CUBE_INDEX_COUNT: u32 = 36;

/// Outward face normals with two tangents whose cross product is the normal
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::Y, Vec3::X),
];

/// Build the unit cube: 4 vertices per face so normals stay flat,
/// triangles wound counterclockwise seen from outside
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(CUBE_INDEX_COUNT as usize);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u16;
        let center = normal * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);
        for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
            vertices.push(Vertex::new(corner.to_array(), normal.to_array()));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(a: [f32; 3]) -> Vec3 {
        Vec3::new(a[0], a[1], a[2])
    }

    #[test]
    fn test_cube_counts() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), CUBE_INDEX_COUNT as usize);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_cube_spans_unit_size() {
        let (vertices, _) = unit_cube();
        for vertex in &vertices {
            for c in vertex.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_triangles_wind_outward() {
        let (vertices, indices) = unit_cube();
        for tri in indices.chunks(3) {
            let a = v(vertices[tri[0] as usize].position);
            let b = v(vertices[tri[1] as usize].position);
            let c = v(vertices[tri[2] as usize].position);
            let n = v(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }
}
