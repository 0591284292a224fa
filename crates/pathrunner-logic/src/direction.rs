//! Input directions. A path's direction key and the typed input buffer are
//! both plain `Direction` sequences.

use serde::{Deserialize, Serialize};

/// One directional keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Arrow glyph shown in sequence displays.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Right => '→',
            Direction::Down => '↓',
            Direction::Left => '←',
        }
    }

    /// Parse a single-letter (`U`/`R`/`D`/`L`, any case) or arrow-glyph direction.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' | 'u' | '↑' => Some(Direction::Up),
            'R' | 'r' | '→' => Some(Direction::Right),
            'D' | 'd' | '↓' => Some(Direction::Down),
            'L' | 'l' | '←' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Render a direction sequence as arrow glyphs, e.g. `↑→↓`.
pub fn format_sequence(seq: &[Direction]) -> String {
    seq.iter().map(|d| d.glyph()).collect()
}

/// Parse a compact script such as `"URRD"` or `"↑→→↓"`. Whitespace is ignored;
/// any other character makes the whole parse fail.
pub fn parse_sequence(s: &str) -> Option<Vec<Direction>> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(Direction::from_char)
        .collect()
}

/// True if `prefix` equals the first `prefix.len()` elements of `key`.
pub fn is_prefix_of(prefix: &[Direction], key: &[Direction]) -> bool {
    key.len() >= prefix.len() && key[..prefix.len()] == *prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn glyph_round_trip_through_from_char() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_char(d.glyph()), Some(d));
        }
    }

    #[test]
    fn format_and_parse() {
        assert_eq!(format_sequence(&[Up, Right, Down, Left]), "↑→↓←");
        assert_eq!(parse_sequence("u r D l"), Some(vec![Up, Right, Down, Left]));
        assert_eq!(parse_sequence("UX"), None);
        assert_eq!(parse_sequence(""), Some(vec![]));
    }

    #[test]
    fn prefix_is_order_sensitive() {
        assert!(is_prefix_of(&[], &[Up]));
        assert!(is_prefix_of(&[Up], &[Up, Right]));
        assert!(is_prefix_of(&[Up, Right], &[Up, Right]));
        assert!(!is_prefix_of(&[Right, Up], &[Up, Right]));
        assert!(!is_prefix_of(&[Up, Right, Down], &[Up, Right]));
    }
}
