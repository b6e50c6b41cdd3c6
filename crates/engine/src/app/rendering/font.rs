//! Embedded 3x5 bitmap font, scaled at draw time. Lowercase letters share
//! the uppercase glyphs; unknown characters draw as blanks.

pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;
pub(crate) const TEXT_SCALE: i32 = 2;
pub const TEXT_GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;
pub const TEXT_LINE_ADVANCE: i32 = (GLYPH_HEIGHT + 2) * TEXT_SCALE;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Glyph {
    rows: [u8; GLYPH_HEIGHT as usize],
}

const SPACE_GLYPH: Glyph = Glyph {
    rows: [0, 0, 0, 0, 0],
};

pub(crate) fn draw_text_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    text: &str,
    color: [u8; 4],
) {
    for ch in text.chars() {
        let glyph = glyph_for(ch);
        draw_glyph_clipped(frame, width, height, x, y, glyph, color);
        x += TEXT_GLYPH_ADVANCE;
    }
}

fn draw_glyph_clipped(frame: &mut [u8], width: u32, height: u32, x: i32, y: i32, glyph: Glyph, color: [u8; 4]) {
    if width == 0 || height == 0 {
        return;
    }

    let width_i32 = width as i32;
    let height_i32 = height as i32;

    for (row_index, row_bits) in glyph.rows.iter().enumerate() {
        let glyph_y = y + row_index as i32 * TEXT_SCALE;

        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }

            let glyph_x = x + col * TEXT_SCALE;
            for sy in 0..TEXT_SCALE {
                let pixel_y = glyph_y + sy;
                if pixel_y < 0 || pixel_y >= height_i32 {
                    continue;
                }
                for sx in 0..TEXT_SCALE {
                    let pixel_x = glyph_x + sx;
                    if pixel_x < 0 || pixel_x >= width_i32 {
                        continue;
                    }
                    super::renderer::write_pixel_rgba(
                        frame,
                        width as usize,
                        pixel_x as usize,
                        pixel_y as usize,
                        color,
                    );
                }
            }
        }
    }
}

fn glyph_for(ch: char) -> Glyph {
    let folded = ch.to_ascii_uppercase();
    match folded {
        ' ' => SPACE_GLYPH,
        'A' => Glyph { rows: [0b010, 0b101, 0b111, 0b101, 0b101] },
        'B' => Glyph { rows: [0b110, 0b101, 0b110, 0b101, 0b110] },
        'C' => Glyph { rows: [0b011, 0b100, 0b100, 0b100, 0b011] },
        'D' => Glyph { rows: [0b110, 0b101, 0b101, 0b101, 0b110] },
        'E' => Glyph { rows: [0b111, 0b100, 0b110, 0b100, 0b111] },
        'F' => Glyph { rows: [0b111, 0b100, 0b110, 0b100, 0b100] },
        'G' => Glyph { rows: [0b011, 0b100, 0b101, 0b101, 0b011] },
        'H' => Glyph { rows: [0b101, 0b101, 0b111, 0b101, 0b101] },
        'I' => Glyph { rows: [0b111, 0b010, 0b010, 0b010, 0b111] },
        'J' => Glyph { rows: [0b001, 0b001, 0b001, 0b101, 0b010] },
        'K' => Glyph { rows: [0b101, 0b101, 0b110, 0b101, 0b101] },
        'L' => Glyph { rows: [0b100, 0b100, 0b100, 0b100, 0b111] },
        'M' => Glyph { rows: [0b101, 0b111, 0b111, 0b101, 0b101] },
        'N' => Glyph { rows: [0b101, 0b111, 0b111, 0b111, 0b101] },
        'O' => Glyph { rows: [0b010, 0b101, 0b101, 0b101, 0b010] },
        'P' => Glyph { rows: [0b110, 0b101, 0b110, 0b100, 0b100] },
        'Q' => Glyph { rows: [0b010, 0b101, 0b101, 0b110, 0b011] },
        'R' => Glyph { rows: [0b110, 0b101, 0b110, 0b101, 0b101] },
        'S' => Glyph { rows: [0b011, 0b100, 0b010, 0b001, 0b110] },
        'T' => Glyph { rows: [0b111, 0b010, 0b010, 0b010, 0b010] },
        'U' => Glyph { rows: [0b101, 0b101, 0b101, 0b101, 0b111] },
        'V' => Glyph { rows: [0b101, 0b101, 0b101, 0b101, 0b010] },
        'W' => Glyph { rows: [0b101, 0b101, 0b111, 0b111, 0b101] },
        'X' => Glyph { rows: [0b101, 0b101, 0b010, 0b101, 0b101] },
        'Y' => Glyph { rows: [0b101, 0b101, 0b010, 0b010, 0b010] },
        'Z' => Glyph { rows: [0b111, 0b001, 0b010, 0b100, 0b111] },
        '0' => Glyph { rows: [0b111, 0b101, 0b101, 0b101, 0b111] },
        '1' => Glyph { rows: [0b010, 0b110, 0b010, 0b010, 0b111] },
        '2' => Glyph { rows: [0b111, 0b001, 0b111, 0b100, 0b111] },
        '3' => Glyph { rows: [0b111, 0b001, 0b011, 0b001, 0b111] },
        '4' => Glyph { rows: [0b101, 0b101, 0b111, 0b001, 0b001] },
        '5' => Glyph { rows: [0b111, 0b100, 0b111, 0b001, 0b111] },
        '6' => Glyph { rows: [0b111, 0b100, 0b111, 0b101, 0b111] },
        '7' => Glyph { rows: [0b111, 0b001, 0b010, 0b010, 0b010] },
        '8' => Glyph { rows: [0b111, 0b101, 0b111, 0b101, 0b111] },
        '9' => Glyph { rows: [0b111, 0b101, 0b111, 0b001, 0b111] },
        '.' => Glyph { rows: [0b000, 0b000, 0b000, 0b000, 0b010] },
        ',' => Glyph { rows: [0b000, 0b000, 0b000, 0b010, 0b100] },
        '!' => Glyph { rows: [0b010, 0b010, 0b010, 0b000, 0b010] },
        '?' => Glyph { rows: [0b110, 0b001, 0b010, 0b000, 0b010] },
        '\'' => Glyph { rows: [0b010, 0b010, 0b000, 0b000, 0b000] },
        '"' => Glyph { rows: [0b101, 0b101, 0b000, 0b000, 0b000] },
        '-' => Glyph { rows: [0b000, 0b000, 0b111, 0b000, 0b000] },
        ':' => Glyph { rows: [0b000, 0b010, 0b000, 0b010, 0b000] },
        ';' => Glyph { rows: [0b000, 0b010, 0b000, 0b010, 0b100] },
        '(' => Glyph { rows: [0b001, 0b010, 0b010, 0b010, 0b001] },
        ')' => Glyph { rows: [0b100, 0b010, 0b010, 0b010, 0b100] },
        '/' => Glyph { rows: [0b001, 0b001, 0b010, 0b100, 0b100] },
        '+' => Glyph { rows: [0b000, 0b010, 0b111, 0b010, 0b000] },
        _ => SPACE_GLYPH,
    }
}
