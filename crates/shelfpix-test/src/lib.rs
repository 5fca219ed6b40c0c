//! shelfpix-test - Regression test support for shelfpix
//!
//! Golden-file regression testing in three modes:
//!
//! - **Generate**: create golden files for later comparison
//! - **Compare**: compare results with golden files
//! - **Display**: run without comparison, for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use shelfpix_test::RegParams;
//!
//! let mut rp = RegParams::new("recolor");
//! rp.compare_values(412.0, top as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use shelfpix_core::{Pix, PixelDepth, color};

/// Load a test image from the test data directory
pub fn load_test_image(name: &str) -> TestResult<Pix> {
    let path = test_data_path(name);
    shelfpix_io::read_image(&path).map_err(|e| TestError::FixtureLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Build a synthetic product photo: a cap-colored band over a white
/// body. Saves checking real photos into the repository for tests that
/// only need a recognizable cap region.
pub fn synthetic_bottle(width: u32, height: u32, cap_height: u32, cap: (u8, u8, u8)) -> Pix {
    let pix = Pix::new(width, height, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    let cap_pixel = color::compose_rgb(cap.0, cap.1, cap.2);
    let body = color::compose_rgb(255, 255, 255);
    for y in 0..height {
        let pixel = if y < cap_height { cap_pixel } else { body };
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, pixel);
        }
    }
    pm.into()
}

fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // shelfpix-test lives at crates/shelfpix-test, two levels below the root
    format!("{}/../..", manifest_dir)
}

/// Path to a file in the shared test data directory
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Path to the regression output directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
