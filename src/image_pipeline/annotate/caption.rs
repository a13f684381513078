use image::RgbImage;
use tracing::debug;

use crate::image_pipeline::annotate::renderer::TextRenderer;
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::meta::CaptionMeta;
use crate::image_pipeline::observation::Observation;

/// The three caption lines, top to bottom.
pub fn caption_lines(observation: &Observation, meta: &CaptionMeta) -> [String; 3] {
    [
        format!(
            "{} - {}, ra: {:.3}° dec: {:.3}°",
            observation.object, meta.id_name, observation.ra, observation.dec
        ),
        format!(
            "{} - {}mm, {} stack - {}",
            observation.date_obs.date(),
            observation.focal_length_mm,
            observation.exposure_hms(),
            observation.instrument
        ),
        format!("{} - {}", meta.author, meta.location_name),
    ]
}

/// Placement of a left-aligned caption block resting on the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionLayout {
    pub font_size: u32,
    pub padding: u32,
    pub line_gap: u32,
}

impl CaptionLayout {
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self {
            font_size: config.font_size,
            padding: config.padding,
            line_gap: config.line_gap,
        }
    }

    /// Top-left origin of each line. Origins above the image are negative and
    /// the renderer clips them.
    pub fn line_origins(&self, image_height: u32, line_count: usize) -> Vec<(i32, i32)> {
        let n = line_count as i64;
        let font = i64::from(self.font_size);
        let gap = i64::from(self.line_gap);
        let top = i64::from(image_height) - n * font - i64::from(self.padding) - n * gap;

        let x = to_i32(i64::from(self.padding));
        (0..n)
            .map(|i| (x, to_i32(top + i * (font + gap))))
            .collect()
    }
}

fn to_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Draws `lines` onto `image` in place.
pub fn draw_caption<T: TextRenderer + ?Sized>(
    image: &mut RgbImage,
    lines: &[String],
    renderer: &T,
    layout: &CaptionLayout,
) {
    let origins = layout.line_origins(image.height(), lines.len());
    for (line, (x, y)) in lines.iter().zip(origins) {
        debug!("Drawing caption line at ({}, {}): {}", x, y, line);
        renderer.draw_text(image, x, y, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::observation::Observation;
    use crate::image_pipeline::test_support::{caption_meta, observation_header};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(i32, i32, String)>>,
    }

    impl TextRenderer for RecordingRenderer {
        fn draw_text(&self, _image: &mut RgbImage, x: i32, y: i32, text: &str) {
            self.calls.borrow_mut().push((x, y, text.to_string()));
        }
    }

    #[test]
    fn test_caption_text() {
        let observation = Observation::from_header(&observation_header()).unwrap();
        let lines = caption_lines(&observation, &caption_meta());

        assert_eq!(lines[0], "M31 - M 31, ra: 10.685° dec: 41.269°");
        assert_eq!(
            lines[1],
            "2024-03-15 - 382mm, 00:05:00 stack - ZWO ASI2600MC Pro"
        );
        assert_eq!(lines[2], "Jane - Mont-Megantic");
    }

    #[test]
    fn test_default_layout_positions() {
        let layout = CaptionLayout::from_config(&ConversionConfig::default());
        // 1000 - 3*100 - 20 - 3*20 = 620, then +120 per line
        assert_eq!(
            layout.line_origins(1000, 3),
            vec![(20, 620), (20, 740), (20, 860)]
        );
    }

    #[test]
    fn test_small_image_origins_go_negative() {
        let layout = CaptionLayout::from_config(&ConversionConfig::default());
        let origins = layout.line_origins(100, 3);
        assert_eq!(origins[0], (20, -280));
    }

    #[test]
    fn test_draw_caption_uses_renderer_per_line() {
        let renderer = RecordingRenderer::default();
        let layout = CaptionLayout {
            font_size: 10,
            padding: 5,
            line_gap: 2,
        };
        let mut image = RgbImage::new(64, 64);
        let lines = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        draw_caption(&mut image, &lines, &renderer, &layout);

        // 64 - 30 - 5 - 6 = 23
        let calls = renderer.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                (5, 23, "a".to_string()),
                (5, 35, "b".to_string()),
                (5, 47, "c".to_string()),
            ]
        );
    }
}
