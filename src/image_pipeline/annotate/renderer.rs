use image::RgbImage;

pub trait TextRenderer {
    /// Draws one line of text with its top-left corner at `(x, y)`, clipping
    /// anything outside the image.
    fn draw_text(&self, image: &mut RgbImage, x: i32, y: i32, text: &str);
}
