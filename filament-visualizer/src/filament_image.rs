use filament_common::{OverlapMap, Vec2};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use palette::{Mix, Srgb};

pub const BACKGROUND: [u8; 3] = [0x30, 0x30, 0x30];
pub const GRADIENT_START: [u8; 3] = [255, 128, 0];
pub const GRADIENT_END: [u8; 3] = [255, 0, 0];
pub const HIGHLIGHT: [u8; 3] = [0, 255, 255];

/// Options for drawing one filament raster.
#[derive(Debug, Clone, Copy)]
pub struct FilamentStyle {
    pub img_size: u32,
    pub padding: u32,
    pub highlight_intersections: bool,
}

/// Maps positions onto a square canvas, keeping the aspect ratio.
///
/// The longer side of the bounding box spans `img_size - 2 * padding` pixels.
/// A box with no extent collapses onto the padding corner.
pub fn scale_positions(positions: &[Vec2], img_size: u32, padding: u32) -> Vec<(f32, f32)> {
    let Some(&first) = positions.first() else {
        return Vec::new();
    };
    let (min, max) = positions.iter().fold((first, first), |(min, max), p| {
        (
            Vec2::new(min.x.min(p.x), min.y.min(p.y)),
            Vec2::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    let span = (max.x - min.x).max(max.y - min.y);
    let drawable = (img_size as f64 - 2.0 * padding as f64).max(0.0);
    let scale = if span > 0.0 { drawable / span } else { 0.0 };

    positions
        .iter()
        .map(|p| {
            (
                ((p.x - min.x) * scale + padding as f64) as f32,
                ((p.y - min.y) * scale + padding as f64) as f32,
            )
        })
        .collect()
}

fn srgb([r, g, b]: [u8; 3]) -> Srgb<u8> {
    Srgb::new(r, g, b)
}

/// Color of point `index` out of `count`, fading from start to end.
pub fn gradient_color(index: usize, count: usize) -> Rgb<u8> {
    let factor = if count > 0 { index as f32 / count as f32 } else { 0.0 };
    let start: Srgb<f32> = srgb(GRADIENT_START).into_format();
    let end: Srgb<f32> = srgb(GRADIENT_END).into_format();
    let mixed: Srgb<u8> = start.mix(end, factor).into_format();
    Rgb([mixed.red, mixed.green, mixed.blue])
}

/// Draws a filled square of side `2 * half + 1` centred on `(x, y)`.
fn draw_square(image: &mut RgbImage, (x, y): (f32, f32), half: i32, color: Rgb<u8>) {
    let side = (2 * half + 1) as u32;
    let rect = Rect::at(x.round() as i32 - half, y.round() as i32 - half).of_size(side, side);
    draw_filled_rect_mut(image, rect, color);
}

/// Renders the filament as gradient squares, with overlapping points
/// optionally highlighted on top.
pub fn draw_filament(positions: &[Vec2], overlaps: &OverlapMap, style: &FilamentStyle) -> RgbImage {
    let mut image = RgbImage::from_pixel(style.img_size, style.img_size, Rgb(BACKGROUND));
    let scaled = scale_positions(positions, style.img_size, style.padding);
    let count = scaled.len();

    for (i, &pos) in scaled.iter().enumerate() {
        if style.highlight_intersections && overlaps.has_overlap(i) {
            continue;
        }
        draw_square(&mut image, pos, 1, gradient_color(i, count));
    }

    // Highlights go last so no later gradient square covers them.
    if style.highlight_intersections {
        for (i, &pos) in scaled.iter().enumerate() {
            if overlaps.has_overlap(i) {
                draw_square(&mut image, pos, 2, Rgb(HIGHLIGHT));
            }
        }
    }

    image
}
