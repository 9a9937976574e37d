//! Static geometry drawn alongside loaded meshes.

use crate::mesh::MeshVertex;

/// Half extent of the city floor on X and Z.
pub const FLOOR_HALF_EXTENT: f32 = 60.0;
/// How many times the ground texture repeats across the floor.
pub const FLOOR_UV_REPEAT: f32 = 30.0;

/// Ground quad at y = 0, two CCW triangles seen from above.
pub const FLOOR_VERTICES: [MeshVertex; 6] = {
    const E: f32 = FLOOR_HALF_EXTENT;
    const R: f32 = FLOOR_UV_REPEAT;
    [
        MeshVertex::new([-E, 0.0, E], [0.0, R]),
        MeshVertex::new([E, 0.0, E], [R, R]),
        MeshVertex::new([E, 0.0, -E], [R, 0.0]),
        MeshVertex::new([-E, 0.0, E], [0.0, R]),
        MeshVertex::new([E, 0.0, -E], [R, 0.0]),
        MeshVertex::new([-E, 0.0, -E], [0.0, 0.0]),
    ]
};

/// Unit cube for the skybox, positions double as cubemap lookup directions.
#[rustfmt::skip]
pub const SKYBOX_VERTICES: [[f32; 3]; 36] = [
    // -Z
    [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
    // -X
    [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],
    // +X
    [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
    // +Z
    [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // +Y
    [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
    // -Y
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_faces_up() {
        let p = |i: usize| FLOOR_VERTICES[i].position;
        for tri in [[0, 1, 2], [3, 4, 5]] {
            let [a, b, c] = tri.map(p);
            let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            // y component of ab x ac
            let ny = ab[2] * ac[0] - ab[0] * ac[2];
            assert!(ny > 0.0);
        }
        assert!(FLOOR_VERTICES.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn skybox_is_unit_cube() {
        assert!(SKYBOX_VERTICES.iter().flatten().all(|c| c.abs() == 1.0));
        // every face of the cube appears in exactly six vertices
        for axis in 0..3 {
            for sign in [-1.0, 1.0] {
                let on_face = SKYBOX_VERTICES
                    .chunks(6)
                    .filter(|face| face.iter().all(|v| v[axis] == sign))
                    .count();
                assert_eq!(on_face, 1, "axis {axis} sign {sign}");
            }
        }
    }
}
