//! Matrix transform walkthrough on glam types
//!
//! Console companion to the rendering demo: compose scale, rotation and
//! translation into one model matrix and push a local-space point through it.
//! Matrix multiplication applies right to left, so the point is translated
//! first, then rotated, then scaled.

use lumina_engine::glam::{Mat4, Vec3, Vec4};

fn main() {
    // Local-space point; w = 1 marks a position rather than a direction.
    let vertex = Vec4::new(1.0, 5.0, 1.0, 1.0);

    let scaling = Mat4::from_scale(Vec3::splat(2.0));
    let rotation = Mat4::from_rotation_y(180f32.to_radians());
    let translation = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));

    let model = scaling * rotation * translation;

    println!("model matrix, column by column:");
    for column in 0..4 {
        println!("  col {}: {:?}", column, model.col(column));
    }

    let world_vertex = model * vertex;
    println!();
    println!("vertex in world space: {:?}", world_vertex);
}
