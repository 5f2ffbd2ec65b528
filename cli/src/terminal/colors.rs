use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 94, g: 196, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 176, b: 59 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 214, g: 214, b: 214 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 120, g: 220, b: 140 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 180, g: 150, b: 255 };
