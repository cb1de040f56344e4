use iced::Color;

// Background colors
pub const BG_DARK: Color = Color::from_rgb(0.05, 0.05, 0.07);
pub const BG_CARD: Color = Color::from_rgb(0.1, 0.11, 0.15);
pub const BG_ROW_WEEKEND: Color = Color::from_rgb(0.13, 0.12, 0.09);
pub const BG_ROW_HIGHLIGHT: Color = Color::from_rgb(0.16, 0.24, 0.35);

// Stroke/border colors
pub const STROKE_DIM: Color = Color::from_rgb(0.2, 0.22, 0.28);

// Accent colors
pub const ACCENT_BLUE: Color = Color::from_rgb(0.35, 0.65, 0.95);
pub const ACCENT_GREEN: Color = Color::from_rgb(0.2, 0.85, 0.5);
pub const ACCENT_RED: Color = Color::from_rgb(1.0, 0.35, 0.35);

// Text colors
pub const TEXT_BRIGHT: Color = Color::from_rgb(0.96, 0.97, 0.99);
pub const TEXT_MUTED: Color = Color::from_rgb(0.6, 0.63, 0.7);
