use crate::{pos, Pos};

/// a named seed, coordinates relative to the pattern's own origin.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

impl Pattern {
    pub fn positions(&self) -> Vec<Pos> {
        self.cells.iter().map(|&(x, y)| pos!(x, y)).collect()
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (0, 1), (1, 1), (2, 1), (2, 2)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
];

pub fn by_name(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name == name)
}

pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|pattern| pattern.name).collect()
}

pub fn default_pattern() -> &'static Pattern {
    &PATTERNS[0]
}

/// parses a plaintext pattern: `#` marks a live cell, a newline moves to
/// the next row, anything else advances a column.
pub fn parse_plaintext(str: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for c in str.chars() {
        match c {
            '#' => {
                result.push(pos);
                pos.x += 1
            }
            '\n' => pos = pos!(0, pos.y + 1),
            _ => pos.x += 1,
        }
    }
    result
}

#[test]
fn test_parse_plaintext() {
    let cells = parse_plaintext(".#.\n..#\n###");
    assert_eq!(
        cells,
        vec![pos!(1, 0), pos!(2, 1), pos!(0, 2), pos!(1, 2), pos!(2, 2)]
    );
}

#[test]
fn test_pattern_lookup() {
    assert_eq!(by_name("glider").unwrap().positions().len(), 5);
    assert!(by_name("no-such-pattern").is_none());
    assert_eq!(default_pattern().name, "r-pentomino");
}
