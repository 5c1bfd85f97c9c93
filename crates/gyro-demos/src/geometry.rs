//! Literal vertex arrays for the demos.
//!
//! Every triangle lists its own vertices; corners shared between triangles
//! are repeated, never indexed.

/// Concatenates three points into one triangle's flat coordinates.
pub const fn triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 9] {
    [a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]]
}

// Corners of a 1.0 x 0.5 x 1.0 box: L/R is x, odd/even is y, 1-2/3-4 is z.
const L1: [f32; 3] = [-0.5, 0.25, -0.5];
const L2: [f32; 3] = [-0.5, -0.25, -0.5];
const L3: [f32; 3] = [-0.5, 0.25, 0.5];
const L4: [f32; 3] = [-0.5, -0.25, 0.5];
const R1: [f32; 3] = [0.5, 0.25, -0.5];
const R2: [f32; 3] = [0.5, -0.25, -0.5];
const R3: [f32; 3] = [0.5, 0.25, 0.5];
const R4: [f32; 3] = [0.5, -0.25, 0.5];

/// Front (z = -0.5) and back (z = 0.5) faces of the box, one triangle each.
pub static BOX_FACES: [[f32; 9]; 4] = [
    triangle(L1, L2, R2),
    triangle(L1, R1, R2),
    triangle(L3, L4, R4),
    triangle(L3, R3, R4),
];

/// Two side-by-side triangles in the z = 0 plane.
pub static TWO_TRIANGLES: [[f32; 9]; 2] = [
    triangle([-0.9, -0.5, 0.0], [-0.1, -0.5, 0.0], [-0.5, 0.5, 0.0]),
    triangle([0.1, -0.5, 0.0], [0.9, -0.5, 0.0], [0.5, 0.5, 0.0]),
];

/// Cube of half-extent 0.4, interleaved `position, normal` per vertex.
///
/// Each triangle winds counter-clockwise around its outward normal
/// (`(b - a) x (c - a)` points outward).
#[rustfmt::skip]
pub static LIT_CUBE: [f32; 216] = [
    // +z
    -0.4, -0.4,  0.4,   0.0,  0.0,  1.0,
     0.4, -0.4,  0.4,   0.0,  0.0,  1.0,
     0.4,  0.4,  0.4,   0.0,  0.0,  1.0,
    -0.4, -0.4,  0.4,   0.0,  0.0,  1.0,
     0.4,  0.4,  0.4,   0.0,  0.0,  1.0,
    -0.4,  0.4,  0.4,   0.0,  0.0,  1.0,
    // -z
     0.4, -0.4, -0.4,   0.0,  0.0, -1.0,
    -0.4, -0.4, -0.4,   0.0,  0.0, -1.0,
    -0.4,  0.4, -0.4,   0.0,  0.0, -1.0,
     0.4, -0.4, -0.4,   0.0,  0.0, -1.0,
    -0.4,  0.4, -0.4,   0.0,  0.0, -1.0,
     0.4,  0.4, -0.4,   0.0,  0.0, -1.0,
    // +x
     0.4, -0.4,  0.4,   1.0,  0.0,  0.0,
     0.4, -0.4, -0.4,   1.0,  0.0,  0.0,
     0.4,  0.4, -0.4,   1.0,  0.0,  0.0,
     0.4, -0.4,  0.4,   1.0,  0.0,  0.0,
     0.4,  0.4, -0.4,   1.0,  0.0,  0.0,
     0.4,  0.4,  0.4,   1.0,  0.0,  0.0,
    // -x
    -0.4, -0.4, -0.4,  -1.0,  0.0,  0.0,
    -0.4, -0.4,  0.4,  -1.0,  0.0,  0.0,
    -0.4,  0.4,  0.4,  -1.0,  0.0,  0.0,
    -0.4, -0.4, -0.4,  -1.0,  0.0,  0.0,
    -0.4,  0.4,  0.4,  -1.0,  0.0,  0.0,
    -0.4,  0.4, -0.4,  -1.0,  0.0,  0.0,
    // +y
    -0.4,  0.4,  0.4,   0.0,  1.0,  0.0,
     0.4,  0.4,  0.4,   0.0,  1.0,  0.0,
     0.4,  0.4, -0.4,   0.0,  1.0,  0.0,
    -0.4,  0.4,  0.4,   0.0,  1.0,  0.0,
     0.4,  0.4, -0.4,   0.0,  1.0,  0.0,
    -0.4,  0.4, -0.4,   0.0,  1.0,  0.0,
    // -y
    -0.4, -0.4, -0.4,   0.0, -1.0,  0.0,
     0.4, -0.4, -0.4,   0.0, -1.0,  0.0,
     0.4, -0.4,  0.4,   0.0, -1.0,  0.0,
    -0.4, -0.4, -0.4,   0.0, -1.0,  0.0,
     0.4, -0.4,  0.4,   0.0, -1.0,  0.0,
    -0.4, -0.4,  0.4,   0.0, -1.0,  0.0,
];
