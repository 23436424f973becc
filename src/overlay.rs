//! Lane outlines drawn over a copy of the gel image.
use crate::image::io::RgbaImageBuf;
use crate::image::ImageView;
use crate::palette::Palette;
use crate::types::{LaneBoundary, Point};

/// Copy `image` and outline every lane (ul → ur → lr → ll → ul) in its colour.
pub fn render_overlay<I: ImageView + ?Sized>(
    image: &I,
    lanes: &[LaneBoundary],
    palette: &Palette,
) -> RgbaImageBuf {
    let mut out = RgbaImageBuf::from_view(image);
    for (index, lane) in lanes.iter().enumerate() {
        let [r, g, b] = palette.color_for(index);
        draw_polygon(&mut out, &lane.polygon(), [r, g, b, 255]);
    }
    out
}

/// Closed polygon outline, one pixel wide.
pub fn draw_polygon(out: &mut RgbaImageBuf, corners: &[Point], rgba: [u8; 4]) {
    for (i, &a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        draw_segment(out, a, b, rgba);
    }
}

/// Straight segment stepped along its major axis; off-image pixels are skipped.
pub fn draw_segment(out: &mut RgbaImageBuf, a: Point, b: Point, rgba: [u8; 4]) {
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let p = a + d * t;
        out.put(p.x.round() as i64, p.y.round() as i64, rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageRgba8;

    #[test]
    fn outline_is_drawn_in_lane_colour() {
        let data = [0u8, 0, 0, 255].repeat(20 * 20);
        let img = ImageRgba8 {
            w: 20,
            h: 20,
            stride: 80,
            data: &data,
        };
        let lane = LaneBoundary {
            ul: Point::new(5.0, 15.0),
            ur: Point::new(9.0, 15.0),
            ll: Point::new(5.0, 2.0),
            lr: Point::new(9.0, 2.0),
        };
        let palette = Palette::default();
        let out = render_overlay(&img, &[lane, lane], &palette);
        let view = out.as_view();
        // Second lane is drawn last, in the second colour.
        assert_eq!(view.pixel(5, 10), [0, 255, 0, 255]);
        assert_eq!(view.pixel(7, 2), [0, 255, 0, 255]);
        assert_eq!(view.pixel(7, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn segments_off_image_are_clipped() {
        let mut out = RgbaImageBuf::new(4, 4, vec![0; 64]);
        draw_segment(
            &mut out,
            Point::new(-3.0, 1.0),
            Point::new(8.0, 1.0),
            [9, 9, 9, 255],
        );
        let view = out.as_view();
        assert_eq!(view.pixel(0, 1), [9, 9, 9, 255]);
        assert_eq!(view.pixel(3, 1), [9, 9, 9, 255]);
        assert_eq!(view.pixel(3, 2), [0, 0, 0, 0]);
    }
}
