//! Sprite lookup: image names and the snake sprite-sheet tables.
//!
//! The snake sheet is a 5x4 grid of cells. Head cells are picked by the
//! snake's direction, tail cells by the offset towards the next segment and
//! body cells by the pair of offsets towards both neighbours.

use std::collections::HashMap;

use crate::game::{Direction, SpriteCoord};

use super::surface::Image;

pub const APPLE: &str = "apple";
pub const SNAKE: &str = "snake";

type Offset = (i32, i32);

const UP: Offset = (0, 1);
const DOWN: Offset = (0, -1);
const LEFT: Offset = (-1, 0);
const RIGHT: Offset = (1, 0);

const BODY: [((Offset, Offset), SpriteCoord); 6] = [
    ((RIGHT, UP), SpriteCoord::new(1, 3)),
    ((DOWN, RIGHT), SpriteCoord::new(1, 4)),
    ((LEFT, RIGHT), SpriteCoord::new(2, 4)),
    ((LEFT, DOWN), SpriteCoord::new(3, 4)),
    ((UP, DOWN), SpriteCoord::new(3, 3)),
    ((UP, LEFT), SpriteCoord::new(3, 2)),
];

const TAIL: [(Offset, SpriteCoord); 4] = [
    (UP, SpriteCoord::new(4, 2)),
    (RIGHT, SpriteCoord::new(5, 2)),
    (DOWN, SpriteCoord::new(5, 1)),
    (LEFT, SpriteCoord::new(4, 1)),
];

/// Head sprite facing `direction`
pub fn head_sprite(direction: Direction) -> SpriteCoord {
    match direction {
        Direction::Up => SpriteCoord::new(4, 4),
        Direction::Right => SpriteCoord::new(5, 4),
        Direction::Down => SpriteCoord::new(5, 3),
        Direction::Left => SpriteCoord::new(4, 3),
    }
}

/// Body sprite joining two neighbours; the pair is unordered
pub fn body_sprite(a: Offset, b: Offset) -> Option<SpriteCoord> {
    BODY.iter()
        .find(|((first, second), _)| (*first, *second) == (a, b) || (*first, *second) == (b, a))
        .map(|(_, coord)| *coord)
}

/// Tail sprite given the offset from the tail to the segment before it
pub fn tail_sprite(towards_next: Offset) -> Option<SpriteCoord> {
    TAIL.iter()
        .find(|(offset, _)| *offset == towards_next)
        .map(|(_, coord)| *coord)
}

/// Symbolic name to image mapping, read-only for the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    images: HashMap<String, Image>,
}

impl SpriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The apple and snake sheets under their usual file names
    pub fn with_defaults() -> Self {
        let mut sprites = Self::new();
        sprites.insert(Image::new(APPLE, "apple.png"));
        sprites.insert(Image::new(SNAKE, "snake.png"));
        sprites
    }

    pub fn insert(&mut self, image: Image) {
        self.images.insert(image.name.clone(), image);
    }

    pub fn get(&self, name: &str) -> Option<&Image> {
        self.images.get(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSETS: [Offset; 4] = [UP, DOWN, LEFT, RIGHT];

    #[test]
    fn test_every_turn_has_a_body_sprite() {
        for a in OFFSETS {
            for b in OFFSETS {
                if a == b {
                    assert_eq!(body_sprite(a, b), None);
                } else {
                    assert!(body_sprite(a, b).is_some(), "{a:?} {b:?}");
                    assert_eq!(body_sprite(a, b), body_sprite(b, a));
                }
            }
        }
    }

    #[test]
    fn test_body_sprite_cells() {
        assert_eq!(body_sprite(UP, DOWN), Some(SpriteCoord::new(3, 3)));
        assert_eq!(body_sprite(RIGHT, LEFT), Some(SpriteCoord::new(2, 4)));
        assert_eq!(body_sprite(UP, RIGHT), Some(SpriteCoord::new(1, 3)));
    }

    #[test]
    fn test_tail_sprite() {
        assert_eq!(tail_sprite(UP), Some(SpriteCoord::new(4, 2)));
        assert_eq!(tail_sprite(LEFT), Some(SpriteCoord::new(4, 1)));
        assert_eq!(tail_sprite((0, 2)), None);
        assert_eq!(tail_sprite((0, 0)), None);
    }

    #[test]
    fn test_head_sprites_are_distinct() {
        let coords: Vec<_> = Direction::ALL.iter().map(|d| head_sprite(*d)).collect();
        for (i, a) in coords.iter().enumerate() {
            for b in &coords[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_sprite_set_defaults() {
        let sprites = SpriteSet::with_defaults();
        assert_eq!(sprites.len(), 2);
        assert_eq!(
            sprites.get(SNAKE).map(|image| image.source.clone()),
            Some(std::path::PathBuf::from("snake.png"))
        );
        assert!(sprites.get("pear").is_none());
    }
}
