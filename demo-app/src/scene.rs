//! A small retained scene standing in for a real view tree.

use viewshot_capture::{Bounds, FrameBuf};

/// RGBA color.
pub type Rgba = [u8; 4];

const BACKGROUND: Rgba = [0xEC, 0xEF, 0xF1, 0xFF];

const CARD_COLORS: [Rgba; 6] = [
    [0x42, 0xA5, 0xF5, 0xFF],
    [0x66, 0xBB, 0x6A, 0xFF],
    [0xFF, 0xCA, 0x28, 0xFF],
    [0xAB, 0x47, 0xBC, 0xFF],
    [0x26, 0xC6, 0xDA, 0xFF],
    [0xEF, 0x53, 0x50, 0xFF],
];

const ACCENT: Rgba = [0xFF, 0x57, 0x22, 0xFF];

const COLUMNS: u32 = 3;
const GAP: u32 = 8;

/// A positioned, colored card.
struct Card {
    bounds: Bounds,
    color: Rgba,
}

/// A retained tree of colored cards over a flat background, with one card
/// carrying an accent highlight that moves on every [`tick`](Scene::tick).
pub struct Scene {
    width: u32,
    height: u32,
    cards: Vec<Card>,
    accent: usize,
}

impl Scene {
    /// Build a three-column card grid filling a `width` x `height` window.
    pub fn card_grid(width: u32, height: u32) -> Self {
        let card_width = width.saturating_sub(GAP * (COLUMNS + 1)) / COLUMNS;
        let card_height = card_width * 3 / 4;

        let mut cards = Vec::new();
        if card_width > 0 && card_height > 0 {
            let mut top = GAP as i32;
            let mut index = 0;
            while top + card_height as i32 <= height.saturating_sub(GAP) as i32 {
                for column in 0..COLUMNS {
                    let left = (GAP + column * (card_width + GAP)) as i32;
                    cards.push(Card {
                        bounds: Bounds::new(left, top, card_width, card_height),
                        color: CARD_COLORS[index % CARD_COLORS.len()],
                    });
                    index += 1;
                }
                top += (card_height + GAP) as i32;
            }
        }

        Self {
            width,
            height,
            cards,
            accent: 0,
        }
    }

    /// Move the accent highlight to the next card.
    pub fn tick(&mut self) {
        if !self.cards.is_empty() {
            self.accent = (self.accent + 1) % self.cards.len();
        }
    }

    /// Rasterize the scene restricted to `bounds`, with the buffer origin at
    /// the bounds' top-left corner.
    pub fn draw_region(&self, bounds: Bounds, buf: &mut FrameBuf) {
        fill_rect(
            buf,
            bounds,
            Bounds::new(0, 0, self.width, self.height),
            BACKGROUND,
        );

        for (index, card) in self.cards.iter().enumerate() {
            let color = if index == self.accent {
                ACCENT
            } else {
                card.color
            };
            fill_rect(buf, bounds, card.bounds, color);
        }
    }
}

/// Fill `rect` (window coordinates) into a buffer whose origin is the
/// top-left corner of `view`.
fn fill_rect(buf: &mut FrameBuf, view: Bounds, rect: Bounds, color: Rgba) {
    let left = rect.left.max(view.left);
    let top = rect.top.max(view.top);
    let right = rect.right().min(view.right());
    let bottom = rect.bottom().min(view.bottom());
    if left >= right || top >= bottom {
        return;
    }

    let row_stride = view.width as usize * 4;
    let data = buf.as_mut_slice();
    for y in top..bottom {
        let row = (y - view.top) as usize;
        let start = row * row_stride + (left - view.left) as usize * 4;
        let end = start + (right - left) as usize * 4;
        for pixel in data[start..end].chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf_data: &[u8], view: Bounds, x: i32, y: i32) -> Rgba {
        let row = (y - view.top) as usize;
        let col = (x - view.left) as usize;
        let start = (row * view.width as usize + col) * 4;
        buf_data[start..start + 4].try_into().unwrap()
    }

    #[test]
    fn test_grid_fills_the_window() {
        let scene = Scene::card_grid(640, 480);
        assert!(!scene.cards.is_empty());
        assert!(scene.cards.iter().all(|card| {
            card.bounds.right() <= 640 && card.bounds.bottom() <= 480
        }));
    }

    #[test]
    fn test_draw_translates_to_region_origin() {
        // First card of a 100x100 grid sits at (8, 8) sized 22x16.
        let scene = Scene::card_grid(100, 100);
        let view = Bounds::new(8, 8, 22, 16);
        let mut buf = FrameBuf::rgba(view);

        scene.draw_region(view, &mut buf);

        let frame = buf.freeze();
        // Card 0 carries the accent before any tick.
        assert_eq!(pixel(frame.data(), view, 8, 8), ACCENT);
        assert_eq!(pixel(frame.data(), view, 29, 23), ACCENT);
    }

    #[test]
    fn test_gap_area_is_background() {
        let scene = Scene::card_grid(100, 100);
        let view = Bounds::new(0, 0, 8, 8);
        let mut buf = FrameBuf::rgba(view);

        scene.draw_region(view, &mut buf);

        let frame = buf.freeze();
        assert!(frame
            .data()
            .chunks_exact(4)
            .all(|px| px == BACKGROUND));
    }

    #[test]
    fn test_tick_moves_the_accent() {
        let mut scene = Scene::card_grid(100, 100);
        let view = Bounds::new(8, 8, 22, 16);

        let mut before = FrameBuf::rgba(view);
        scene.draw_region(view, &mut before);

        scene.tick();

        let mut after = FrameBuf::rgba(view);
        scene.draw_region(view, &mut after);

        assert_eq!(pixel(before.freeze().data(), view, 8, 8), ACCENT);
        assert_eq!(pixel(after.freeze().data(), view, 8, 8), CARD_COLORS[0]);
    }
}
