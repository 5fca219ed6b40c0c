//! Product code generation regression test
//!
//! Renders the UPC-A barcode and batch-verification QR code for one
//! SKU and checks the structural properties of both symbols.

use shelfpix_codes::{QrOptions, UpcaOptions, check_digit, encode_upca, render_qr, render_upca};
use shelfpix_core::PixelDepth;
use shelfpix_test::RegParams;

#[test]
fn codes_reg() {
    let mut rp = RegParams::new("codes");

    // Test 1: check digit for the textbook code
    rp.compare_values(
        2.0,
        check_digit(&[0, 3, 6, 0, 0, 0, 2, 9, 1, 4, 5]) as f64,
        0.0,
    );

    // Test 2: a symbol is always 95 modules with 11-digit input
    let modules = encode_upca("03600029145").unwrap();
    rp.compare_values(95.0, modules.len() as f64, 0.0);

    // Test 3: guards sit where the format says
    let guard_ok = modules[0] && !modules[1] && modules[2];
    let mid_ok =
        !modules[45] && modules[46] && !modules[47] && modules[48] && !modules[49];
    let end_ok = modules[92] && !modules[93] && modules[94];
    rp.compare_values(1.0, (guard_ok && mid_ok && end_ok) as u8 as f64, 0.0);

    // Test 4: rendered barcode geometry
    let options = UpcaOptions {
        module_width: 2,
        bar_height: 40,
        quiet_zone: 9,
    };
    let bars = render_upca("03600029145", &options).unwrap();
    rp.compare_values(1.0, (bars.depth() == PixelDepth::Bit8) as u8 as f64, 0.0);
    rp.compare_values(((95 + 18) * 2) as f64, bars.width() as f64, 0.0);
    rp.compare_values(40.0, bars.height() as f64, 0.0);
    // Quiet zone white, first guard bar black
    rp.compare_values(255.0, bars.get_pixel(0, 20).unwrap() as f64, 0.0);
    rp.compare_values(0.0, bars.get_pixel(18, 20).unwrap() as f64, 0.0);

    // Test 5: QR code for a batch verification URL
    let qr = render_qr(
        "https://example.com/batch-verification?sku=ASH-60",
        &QrOptions::default(),
    )
    .unwrap();
    rp.compare_values(1.0, (qr.width() == qr.height()) as u8 as f64, 0.0);
    // Border of 4 modules at size 10 is all white
    rp.compare_values(255.0, qr.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(255.0, qr.get_pixel(39, 39).unwrap() as f64, 0.0);
    // Finder pattern corner is black
    rp.compare_values(0.0, qr.get_pixel(40, 40).unwrap() as f64, 0.0);

    // Test 6: bad check digits are rejected
    rp.compare_values(1.0, encode_upca("036000291453").is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup());
}
