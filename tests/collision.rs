mod common;

use std::sync::Arc;

use glam::IVec2;
use image::{Rgba, RgbaImage};

use common::opaque_image;
use dino_runner::collision::CollisionDetector;
use dino_runner::geometry::Rect;
use dino_runner::mask::PixelMask;
use dino_runner::spawn::obstacle::{Obstacle, Pinning};
use dino_runner::sprite::variant::SpriteVariant;

fn obstacle_at(image: &RgbaImage, x: f32, y: f32) -> Obstacle {
    let variant = Arc::new(SpriteVariant::from_image(image, image.height(), 50));
    Obstacle::new(variant, x, y, 230.0, Pinning::Pinned)
}

fn player_mask() -> PixelMask {
    PixelMask::from_alpha(&opaque_image(50, 50), 50)
}

#[test]
fn test_overlapping_solid_sprites_collide() {
    let obstacles = vec![obstacle_at(&opaque_image(40, 40), 100.0, 100.0)];
    let detector = CollisionDetector::default();

    let hit = detector.collides(
        &obstacles,
        &player_mask(),
        IVec2::new(90, 90),
        Rect::new(90, 90, 50, 50),
    );
    assert!(hit);
}

#[test]
fn test_disjoint_rects_never_collide() {
    let obstacles = vec![obstacle_at(&opaque_image(40, 40), 100.0, 100.0)];
    let detector = CollisionDetector::default();

    let hit = detector.collides(
        &obstacles,
        &player_mask(),
        IVec2::new(0, 0),
        Rect::new(0, 0, 50, 50),
    );
    assert!(!hit);
}

#[test]
fn test_min_overlap_threshold() {
    // One corner pixel of overlap: rectangles intersect, but the pixel
    // count sits below the default threshold.
    let obstacles = vec![obstacle_at(&opaque_image(40, 40), 49.0, 49.0)];
    let player = player_mask();
    let player_rect = Rect::new(0, 0, 50, 50);

    assert!(!CollisionDetector::default().collides(
        &obstacles,
        &player,
        IVec2::new(0, 0),
        player_rect
    ));
    assert!(CollisionDetector::new(1).collides(&obstacles, &player, IVec2::new(0, 0), player_rect));
}

#[test]
fn test_transparent_interior_does_not_collide() {
    // Obstacle with opaque pixels only on its outermost columns; the
    // player overlaps the transparent middle, so rectangles intersect but
    // masks do not.
    let mut image = RgbaImage::new(40, 40);
    for y in 0..40 {
        image.put_pixel(0, y, Rgba([0, 0, 0, 255]));
        image.put_pixel(39, y, Rgba([0, 0, 0, 255]));
    }
    let obstacles = vec![obstacle_at(&image, 100.0, 0.0)];
    let detector = CollisionDetector::default();

    let player = PixelMask::from_alpha(&opaque_image(10, 10), 50);
    let hit = detector.collides(
        &obstacles,
        &player,
        IVec2::new(115, 5),
        Rect::new(115, 5, 10, 10),
    );
    assert!(!hit);

    // Shifted onto the opaque column, the same player collides.
    let hit = detector.collides(
        &obstacles,
        &player,
        IVec2::new(95, 5),
        Rect::new(95, 5, 10, 10),
    );
    assert!(hit);
}

#[test]
fn test_first_qualifying_obstacle_wins() {
    let obstacles = vec![
        obstacle_at(&opaque_image(40, 40), 400.0, 100.0),
        obstacle_at(&opaque_image(40, 40), 100.0, 100.0),
    ];
    let detector = CollisionDetector::default();

    let hit = detector.collides(
        &obstacles,
        &player_mask(),
        IVec2::new(110, 110),
        Rect::new(110, 110, 50, 50),
    );
    assert!(hit);
}

#[test]
fn test_empty_collection_never_collides() {
    let detector = CollisionDetector::default();
    assert!(!detector.collides(&[], &player_mask(), IVec2::new(0, 0), Rect::new(0, 0, 50, 50)));
}
