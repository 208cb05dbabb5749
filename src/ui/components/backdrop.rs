use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::ui::theme::Palette;

const STAR_DENSITY: u64 = 41;

/// Star field drawn behind the portfolio. It scrolls with the content,
/// scaled by the parallax intensity, so it appears further away.
pub struct Backdrop<'a> {
    offset: i64,
    palette: &'a Palette,
}

impl<'a> Backdrop<'a> {
    pub fn new(scroll: u16, intensity: f32, palette: &'a Palette) -> Self {
        Self {
            offset: parallax_offset(scroll, intensity),
            palette,
        }
    }
}

/// Background rows travel at half the content speed at intensity 1.0.
pub fn parallax_offset(scroll: u16, intensity: f32) -> i64 {
    (scroll as f32 * intensity.max(0.0) * 0.5).round() as i64
}

fn hash(x: u64, y: u64) -> u64 {
    let mut h = x.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ y.wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
    h ^= h >> 29;
    h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 32)
}

pub fn star_at(x: u16, world_y: i64) -> Option<&'static str> {
    let h = hash(x as u64, world_y as u64);
    if h % STAR_DENSITY != 0 {
        return None;
    }
    Some(match (h / STAR_DENSITY) % 3 {
        0 => "·",
        1 => "+",
        _ => "✦",
    })
}

impl<'a> Widget for Backdrop<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.palette.neutral)
            .add_modifier(Modifier::DIM);
        for y in area.top()..area.bottom() {
            let world_y = (y - area.top()) as i64 + self.offset;
            for x in area.left()..area.right() {
                if let Some(star) = star_at(x - area.left(), world_y) {
                    buf[(x, y)].set_symbol(star).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_scales_the_offset() {
        assert_eq!(parallax_offset(10, 0.0), 0);
        assert_eq!(parallax_offset(10, 1.0), 5);
        assert_eq!(parallax_offset(10, 2.0), 10);
        assert_eq!(parallax_offset(10, -1.0), 0);
    }

    #[test]
    fn field_shifts_with_the_offset() {
        let palette = crate::ui::theme::palette(crate::nav::Theme::Neon);
        let area = Rect::new(0, 0, 40, 20);

        let mut still = Buffer::empty(area);
        Backdrop::new(0, 1.0, &palette).render(area, &mut still);
        let mut moved = Buffer::empty(area);
        Backdrop::new(4, 1.0, &palette).render(area, &mut moved);

        // Scrolling by 4 at intensity 1.0 moves the field up by 2 rows.
        for y in 0..18 {
            for x in 0..40 {
                assert_eq!(moved[(x, y)].symbol(), still[(x, y + 2)].symbol());
            }
        }
        let stars = (0..20)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .filter(|&(x, y)| still[(x, y)].symbol() != " ")
            .count();
        assert!(stars > 0);
    }
}
