//! Render system.
//!
//! Paints the board and entities on the surface while the game is on and
//! hands the state back untouched.

use crate::game::error::{GameError, Segment};
use crate::game::grid::{Cell, Layout, SpriteCoord};
use crate::game::state::{Apple, Entity, GameState, Snake};
use crate::render::sprites::{body_sprite, head_sprite, tail_sprite};
use crate::render::{Rgb, SpriteSet, Surface};

const LIGHT_GRASS: Rgb = Rgb(170, 215, 81);
const DARK_GRASS: Rgb = Rgb(162, 209, 73);
/// Drawn when the snake sheet is missing
const SNAKE_FILL: Rgb = Rgb(71, 117, 235);
/// Drawn when the apple image is missing
const APPLE_FILL: Rgb = Rgb(231, 71, 29);

const GAME_OVER_TEXT: &str = "Game Over";

pub fn render_system(
    state: GameState,
    surface: &mut dyn Surface,
    sprites: &SpriteSet,
    layout: Layout,
) -> Result<GameState, GameError> {
    if !state.settings.game_on {
        return Ok(state);
    }

    surface.clear_rect(layout.full_rect());
    draw_background(surface, layout);

    for entity in state.entities() {
        match entity {
            Entity::Settings(_) => {}
            Entity::Snake(snake) => draw_snake(surface, sprites, layout, snake)?,
            Entity::Apple(apple) => draw_apple(surface, sprites, layout, apple),
        }
    }

    Ok(state)
}

/// Checkerboard of two grass tones
pub fn draw_background(surface: &mut dyn Surface, layout: Layout) {
    for y in 0..layout.grid.height {
        for x in 0..layout.grid.width {
            let color = if (y % 2 + x) % 2 == 0 {
                LIGHT_GRASS
            } else {
                DARK_GRASS
            };
            surface.fill_rect(layout.cell_rect(Cell::new(x, y)), color);
        }
    }
}

/// End screen drawn over the last frame
pub fn draw_game_over(surface: &mut dyn Surface, layout: Layout) {
    surface.fill_text(
        GAME_OVER_TEXT,
        2 * layout.cell_size,
        9 * layout.cell_size,
        Rgb::BLACK,
    );
}

fn draw_apple(surface: &mut dyn Surface, sprites: &SpriteSet, layout: Layout, apple: &Apple) {
    let dest = layout.cell_rect(apple.position);
    match sprites.get(&apple.sprite.name) {
        Some(image) => surface.draw_image(image, None, dest),
        None => surface.fill_rect(dest, APPLE_FILL),
    }
}

fn draw_snake(
    surface: &mut dyn Surface,
    sprites: &SpriteSet,
    layout: Layout,
    snake: &Snake,
) -> Result<(), GameError> {
    let image = sprites.get(&snake.sprite.name);

    for (index, cell) in snake.position.iter().enumerate() {
        let coord = segment_sprite(snake, index)?;
        let dest = layout.cell_rect(*cell);
        match image {
            Some(image) => {
                let source = Layout::sprite_source(coord, snake.sprite.size);
                surface.draw_image(image, Some(source), dest);
            }
            None => surface.fill_rect(dest, SNAKE_FILL),
        }
    }

    Ok(())
}

/// Sprite-sheet cell for the segment at `index`
fn segment_sprite(snake: &Snake, index: usize) -> Result<SpriteCoord, GameError> {
    let body = &snake.position;
    let cell = body[index];

    if index == 0 {
        return Ok(head_sprite(snake.direction));
    }

    let next = cell.offset_to(body[index - 1]);
    if index == body.len() - 1 {
        return tail_sprite(next).ok_or_else(|| GameError::UnknownSpriteJunction {
            segment: Segment::Tail,
            cell,
            offsets: vec![next],
        });
    }

    let former = cell.offset_to(body[index + 1]);
    body_sprite(former, next).ok_or_else(|| GameError::UnknownSpriteJunction {
        segment: Segment::Body,
        cell,
        offsets: vec![former, next],
    })
}
