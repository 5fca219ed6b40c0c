//! UPC-A barcode encoder
//!
//! Reference: <http://en.wikipedia.org/wiki/UniversalProductCode>
//!            <http://morovia.com/education/symbology/upc-a.asp>
//!
//! Each digit is 2 bars and 2 spaces spanning 7 modules. A symbol is
//! 95 modules: a "111" start guard, 6 left digits (space-first), a
//! "11111" center guard, 6 right digits (bar-first), and a "111" end
//! guard. The 12th digit is a check digit.

use crate::{CodeError, CodeResult};
use shelfpix_core::{Pix, PixelDepth};

/// Bar/space width patterns for the digits 0-9
const UPCA: &[&str] = &[
    "3211", // 0
    "2221", // 1
    "2122", // 2
    "1411", // 3
    "1132", // 4
    "1231", // 5
    "1114", // 6
    "1312", // 7
    "1213", // 8
    "3112", // 9
];

const GUARD: &str = "111";
const MID_GUARD: &str = "11111";

/// Total symbol width in modules
pub const UPCA_MODULES: usize = 95;

/// Compute the UPC-A check digit for 11 payload digits
///
/// Sum of digits at even positions times 3, plus digits at odd
/// positions, rounded up to the next multiple of 10.
pub fn check_digit(digits: &[u8]) -> u8 {
    let mut sum: u32 = 0;
    for (i, &d) in digits.iter().enumerate() {
        if i % 2 == 0 {
            sum += 3 * d as u32;
        } else {
            sum += d as u32;
        }
    }
    ((10 - (sum % 10)) % 10) as u8
}

fn parse_digits(code: &str) -> CodeResult<Vec<u8>> {
    code.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| CodeError::InvalidDigits(format!("non-digit character '{}'", c)))
        })
        .collect()
}

/// Encode a UPC-A code as a 95-element module vector
///
/// `true` is a bar, `false` a space. Accepts either 11 digits (the
/// check digit is appended) or 12 digits (the check digit is
/// verified).
pub fn encode_upca(code: &str) -> CodeResult<Vec<bool>> {
    let mut digits = parse_digits(code)?;

    match digits.len() {
        11 => {
            let check = check_digit(&digits);
            digits.push(check);
        }
        12 => {
            let check = check_digit(&digits[..11]);
            if check != digits[11] {
                return Err(CodeError::InvalidDigits(format!(
                    "check digit mismatch: expected {}, got {}",
                    check, digits[11]
                )));
            }
        }
        n => {
            return Err(CodeError::InvalidDigits(format!(
                "expected 11 or 12 digits, got {}",
                n
            )));
        }
    }

    let mut modules = Vec::with_capacity(UPCA_MODULES);

    // Guards and left digits alternate from a known parity: guards
    // start on a bar, left digits on a space, right digits on a bar.
    push_runs(&mut modules, GUARD, true);
    for &d in &digits[..6] {
        push_runs(&mut modules, UPCA[d as usize], false);
    }
    push_runs(&mut modules, MID_GUARD, false);
    for &d in &digits[6..] {
        push_runs(&mut modules, UPCA[d as usize], true);
    }
    push_runs(&mut modules, GUARD, true);

    debug_assert_eq!(modules.len(), UPCA_MODULES);
    Ok(modules)
}

fn push_runs(modules: &mut Vec<bool>, widths: &str, first_is_bar: bool) {
    let mut bar = first_is_bar;
    for w in widths.chars() {
        let w = w.to_digit(10).unwrap() as usize;
        for _ in 0..w {
            modules.push(bar);
        }
        bar = !bar;
    }
}

/// Rendering options for UPC-A barcodes
#[derive(Debug, Clone)]
pub struct UpcaOptions {
    /// Width of one module in pixels
    pub module_width: u32,
    /// Bar height in pixels
    pub bar_height: u32,
    /// Quiet zone on each side, in modules
    pub quiet_zone: u32,
}

impl Default for UpcaOptions {
    fn default() -> Self {
        Self {
            module_width: 3,
            bar_height: 150,
            quiet_zone: 9,
        }
    }
}

/// Render a UPC-A code to an 8 bpp image
///
/// Bars are black (0), spaces and the quiet zone white (255).
pub fn render_upca(code: &str, options: &UpcaOptions) -> CodeResult<Pix> {
    let modules = encode_upca(code)?;

    let width = (UPCA_MODULES as u32 + 2 * options.quiet_zone) * options.module_width;
    let height = options.bar_height;

    let pix = Pix::new(width, height, PixelDepth::Bit8)?;
    let mut pm = pix.try_into_mut().unwrap();
    pm.fill(255);

    let offset = options.quiet_zone * options.module_width;
    for (i, &bar) in modules.iter().enumerate() {
        if !bar {
            continue;
        }
        let x0 = offset + i as u32 * options.module_width;
        for y in 0..height {
            for x in x0..x0 + options.module_width {
                pm.set_pixel_unchecked(x, y, 0);
            }
        }
    }

    Ok(pm.into())
}
