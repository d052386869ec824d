//! Raster compositing for ticket images.

use super::{TicketData, TicketRenderError};
use ab_glyph::{FontRef, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::io::Cursor;
use std::sync::OnceLock;

const FONT_REGULAR_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_BOLD_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

static FONT_REGULAR: OnceLock<FontRef<'static>> = OnceLock::new();
static FONT_BOLD: OnceLock<FontRef<'static>> = OnceLock::new();

fn font_regular() -> Result<&'static FontRef<'static>, TicketRenderError> {
    if let Some(font) = FONT_REGULAR.get() {
        return Ok(font);
    }
    let font = FontRef::try_from_slice(FONT_REGULAR_BYTES)
        .map_err(|e| TicketRenderError::Font(e.to_string()))?;
    Ok(FONT_REGULAR.get_or_init(|| font))
}

fn font_bold() -> Result<&'static FontRef<'static>, TicketRenderError> {
    if let Some(font) = FONT_BOLD.get() {
        return Ok(font);
    }
    let font = FontRef::try_from_slice(FONT_BOLD_BYTES)
        .map_err(|e| TicketRenderError::Font(e.to_string()))?;
    Ok(FONT_BOLD.get_or_init(|| font))
}

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 400;

// Brand green gradient endpoints, top-left to bottom-right
const GRADIENT_START: [u8; 3] = [22, 163, 74];
const GRADIENT_END: [u8; 3] = [6, 70, 40];

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
// Dark ink for arbitrary (usually light) templates
const TEMPLATE_INK: Rgba<u8> = Rgba([26, 26, 26, 255]);

/// Minimum template width below which the fixed-size centered text is
/// known to overflow. Narrower templates still render, with a warning.
const MIN_TEMPLATE_WIDTH: u32 = 600;

/// Render the built-in 800×400 ticket design.
pub fn render_default_ticket(data: &TicketData) -> Result<Vec<u8>, TicketRenderError> {
    let regular = font_regular()?;
    let bold = font_bold()?;

    let mut img = RgbaImage::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    fill_gradient(&mut img);

    // Outer white 8px border, inner black 2px border
    draw_border(&mut img, 10, 8, WHITE);
    draw_border(&mut img, 22, 2, BLACK);

    draw_centered(&mut img, bold, 30.0, 52, WHITE, "FusionX EVENT TICKET");
    draw_centered(&mut img, bold, 44.0, 100, WHITE, &data.member_code);
    draw_centered(&mut img, regular, 30.0, 168, WHITE, &data.member_name);
    draw_centered(&mut img, regular, 24.0, 216, WHITE, &data.event_title);
    draw_centered(&mut img, regular, 20.0, 258, WHITE, &data.date_time_line());
    draw_centered(&mut img, regular, 20.0, 294, WHITE, &data.venue);

    if data.total_members > 1 {
        let member_line = format!(
            "Member {} of {}",
            data.member_index + 1,
            data.total_members
        );
        draw_centered(&mut img, regular, 16.0, 348, WHITE, &member_line);
    }

    encode_png(&img)
}

/// Composite identity text onto an uploaded template image.
///
/// The output canvas matches the template's pixel dimensions exactly.
/// Four centered lines are stacked around the vertical center in a single
/// dark ink for contrast against arbitrary templates. No line wrapping is
/// performed; templates narrower than ~600px may clip.
pub fn render_ticket_on_template(
    template_bytes: &[u8],
    data: &TicketData,
) -> Result<Vec<u8>, TicketRenderError> {
    let regular = font_regular()?;
    let bold = font_bold()?;

    let template = image::load_from_memory(template_bytes)
        .map_err(|e| TicketRenderError::Decode(e.to_string()))?;
    let mut img = template.to_rgba8();

    if img.width() < MIN_TEMPLATE_WIDTH {
        tracing::warn!(
            width = img.width(),
            "ticket template narrower than {}px, centered text may overflow",
            MIN_TEMPLATE_WIDTH
        );
    }

    let cy = img.height() as i32 / 2;

    draw_centered(&mut img, bold, 42.0, cy - 40, TEMPLATE_INK, &data.member_code);
    draw_centered(&mut img, bold, 30.0, cy + 5, TEMPLATE_INK, &data.member_name);
    draw_centered(&mut img, regular, 24.0, cy + 40, TEMPLATE_INK, &data.event_title);
    draw_centered(&mut img, regular, 20.0, cy + 75, TEMPLATE_INK, &data.date_time_line());

    encode_png(&img)
}

/// Diagonal linear gradient across the full canvas.
fn fill_gradient(img: &mut RgbaImage) {
    let span = (img.width() + img.height() - 2).max(1) as f32;
    for y in 0..img.height() {
        for x in 0..img.width() {
            let t = (x + y) as f32 / span;
            let px = [
                lerp(GRADIENT_START[0], GRADIENT_END[0], t),
                lerp(GRADIENT_START[1], GRADIENT_END[1], t),
                lerp(GRADIENT_START[2], GRADIENT_END[2], t),
                255,
            ];
            img.put_pixel(x, y, Rgba(px));
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Draw a rectangular border of the given thickness, inset from the edges.
fn draw_border(img: &mut RgbaImage, inset: u32, thickness: u32, color: Rgba<u8>) {
    for i in 0..thickness {
        let offset = inset + i;
        let w = img.width().saturating_sub(offset * 2);
        let h = img.height().saturating_sub(offset * 2);
        if w < 2 || h < 2 {
            break;
        }
        draw_hollow_rect_mut(
            img,
            Rect::at(offset as i32, offset as i32).of_size(w, h),
            color,
        );
    }
}

/// Draw a line of text horizontally centered at the given top y.
fn draw_centered(
    img: &mut RgbaImage,
    font: &FontRef<'_>,
    size: f32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let scale = PxScale::from(size);
    let (text_w, _) = text_size(scale, font, text);
    let x = (img.width() as i32 - text_w as i32) / 2;
    draw_text_mut(img, color, x.max(0), y, scale, font, text);
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, TicketRenderError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| TicketRenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(total: u32) -> TicketData {
        TicketData {
            booking_code: "FX001".to_string(),
            member_code: "FX001".to_string(),
            member_name: "Asha Rao".to_string(),
            event_title: "Fusion Night 2026".to_string(),
            date: "15 March 2026".to_string(),
            time: "7:00 PM".to_string(),
            venue: "GLITZFUSION Arena".to_string(),
            member_index: 0,
            total_members: total,
        }
    }

    fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).expect("output must decode as an image");
        (img.width(), img.height())
    }

    #[test]
    fn test_default_ticket_is_800x400_png() {
        for total in [1, 2, 7] {
            let mut data = sample_data(total);
            data.member_index = total - 1;
            let bytes = render_default_ticket(&data).unwrap();
            assert_eq!(png_dimensions(&bytes), (800, 400));
        }
    }

    #[test]
    fn test_templated_ticket_matches_template_dimensions() {
        let template = RgbaImage::from_pixel(1000, 500, Rgba([240, 240, 240, 255]));
        let mut template_bytes = Vec::new();
        template
            .write_to(&mut Cursor::new(&mut template_bytes), image::ImageFormat::Png)
            .unwrap();

        let bytes = render_ticket_on_template(&template_bytes, &sample_data(1)).unwrap();
        assert_eq!(png_dimensions(&bytes), (1000, 500));
    }

    #[test]
    fn test_corrupt_template_is_a_decode_error() {
        let err = render_ticket_on_template(b"not an image", &sample_data(1)).unwrap_err();
        assert!(matches!(err, TicketRenderError::Decode(_)));
    }

    #[test]
    fn test_templated_text_differs_from_bare_template() {
        let template = RgbaImage::from_pixel(800, 400, Rgba([255, 255, 255, 255]));
        let mut template_bytes = Vec::new();
        template
            .write_to(&mut Cursor::new(&mut template_bytes), image::ImageFormat::Png)
            .unwrap();

        let rendered = render_ticket_on_template(&template_bytes, &sample_data(1)).unwrap();
        let rendered_img = image::load_from_memory(&rendered).unwrap().to_rgba8();
        // Some pixels near the center must have been inked
        let inked = rendered_img
            .pixels()
            .filter(|p| p.0[0] < 200 && p.0[3] == 255)
            .count();
        assert!(inked > 0, "expected composited text to darken pixels");
    }
}
