use anyhow::{Context, Result, anyhow};
use eframe::egui::Color32;

pub fn parse_hex_color(value: &str) -> Result<Color32> {
    let digits = value
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color {value:?} must start with '#'"))?;

    if digits.len() != 6 || !digits.is_ascii() {
        return Err(anyhow!("color {value:?} must have the form #RRGGBB"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .with_context(|| format!("color {value:?} contains a non-hex digit"))
    };

    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn preview_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head = text.chars().take(max_chars).collect::<String>();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}
