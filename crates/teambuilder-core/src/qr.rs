//! QR codes for share links and tokens.

use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

use crate::error::{TeamError, TeamResult};

/// Default rendered size in pixels for SVG output
pub const DEFAULT_QR_SIZE: u32 = 200;

fn build(text: &str) -> TeamResult<QrCode> {
    QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
        .map_err(|e| TeamError::Qr(format!("Failed to generate QR code: {}", e)))
}

/// Render `text` as an SVG document at least `size`×`size` pixels.
pub fn render_svg(text: &str, size: u32) -> TeamResult<String> {
    let code = build(text)?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Render `text` with half-height block characters for a terminal.
pub fn render_terminal(text: &str) -> TeamResult<String> {
    let code = build(text)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg() {
        let svg = render_svg("https://example.com/#abc", DEFAULT_QR_SIZE).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }

    #[test]
    fn test_render_terminal() {
        let text = render_terminal("abc").unwrap();
        assert!(text.lines().count() > 5);
    }

    #[test]
    fn test_too_long_is_qr_error() {
        let huge = "x".repeat(10_000);
        assert!(matches!(render_svg(&huge, 100), Err(TeamError::Qr(_))));
    }
}
