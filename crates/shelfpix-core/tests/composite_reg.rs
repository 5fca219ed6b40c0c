//! Logo compositing regression test
//!
//! Walks the label-replacement flow: scale a logo to the label area,
//! then paste it over the base photo through its alpha channel.

use shelfpix_core::{Pix, PixelDepth, color};
use shelfpix_test::RegParams;

fn base_photo() -> Pix {
    let pix = Pix::new(60, 60, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.fill(color::compose_rgb(240, 240, 240));
    pm.into()
}

fn logo(width: u32, height: u32) -> Pix {
    let pix = Pix::new(width, height, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.set_spp(4).unwrap();
    // Opaque red mark on a transparent field
    for y in 0..height {
        for x in 0..width {
            let pixel = if x >= width / 4 && x < 3 * width / 4 {
                color::compose_rgba(200, 0, 0, 255)
            } else {
                color::compose_rgba(0, 0, 0, 0)
            };
            pm.set_pixel_unchecked(x, y, pixel);
        }
    }
    pm.into()
}

#[test]
fn composite_reg() {
    let mut rp = RegParams::new("composite");

    // Test 1: downscale keeps dimensions and samples-per-pixel
    let mark = logo(40, 20);
    let scaled = mark.scale_bilinear(20, 10).unwrap();
    rp.compare_values(20.0, scaled.width() as f64, 0.0);
    rp.compare_values(10.0, scaled.height() as f64, 0.0);
    rp.compare_values(4.0, scaled.spp() as f64, 0.0);

    // Test 2: paste through alpha - opaque center lands, transparent
    // edges leave the base visible
    let base = base_photo();
    let out = base.overlay_alpha(&scaled, 10, 20).unwrap();
    rp.compare_values(200.0, out.get_rgb(20, 25).unwrap().0 as f64, 0.0);
    rp.compare_values(240.0, out.get_rgb(11, 25).unwrap().0 as f64, 0.0);
    rp.compare_values(240.0, out.get_rgb(5, 5).unwrap().0 as f64, 0.0);

    // Test 3: half-transparent overlay blends toward the overlay color
    let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.set_spp(4).unwrap();
    pm.fill(color::compose_rgba(0, 0, 0, 128));
    let veil: Pix = pm.into();

    let out = base.overlay_alpha(&veil, 0, 0).unwrap();
    let (r, _, _) = out.get_rgb(1, 1).unwrap();
    rp.compare_values(120.0, r as f64, 2.0);

    // Test 4: an overlay hanging off the edge is clipped, not an error
    let out = base.overlay_alpha(&scaled, -5, 55).unwrap();
    rp.compare_values(60.0, out.width() as f64, 0.0);
    rp.compare_values(60.0, out.height() as f64, 0.0);

    // Test 5: upscale of a flat field stays flat
    let pix = Pix::new(8, 8, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.fill(color::compose_rgb(17, 34, 51));
    let flat: Pix = pm.into();
    let big = flat.scale_bilinear(32, 32).unwrap();
    rp.compare_values(17.0, big.get_rgb(16, 16).unwrap().0 as f64, 0.0);
    rp.compare_values(34.0, big.get_rgb(31, 31).unwrap().1 as f64, 0.0);

    assert!(rp.cleanup());
}
