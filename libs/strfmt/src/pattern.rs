//! Formats recognized by a simple pattern.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color pattern")
});

static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    const OCTET: &str = r"\s*(0|[1-9][0-9]?|1[0-9][0-9]|2[0-4][0-9]|25[0-5])\s*";
    Regex::new(&format!(r"^rgb\({OCTET},{OCTET},{OCTET}\)$")).expect("valid rgb color pattern")
});

/// `#` optional, followed by three or six hex digits.
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR.is_match(s)
}

/// CSS functional notation `rgb(r,g,b)` with components 0-255.
pub fn is_rgb_color(s: &str) -> bool {
    RGB_COLOR.is_match(s)
}

/// Standard-alphabet base64 with padding.
pub fn is_base64(s: &str) -> bool {
    STANDARD.decode(s).is_ok()
}

/// Any text is a valid password.
pub fn is_password(_s: &str) -> bool {
    true
}
