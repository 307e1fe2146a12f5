use serde::{Serialize, Serializer};
use std::fmt;

use PunchRow::{
    Eight as R8, Eleven as R11, Five as R5, Four as R4, Nine as R9, One as R1, Seven as R7,
    Six as R6, Three as R3, Twelve as R12, Two as R2, Zero as R0,
};

/// There are 12 punch rows in total: 12, 11, and 0..9.
/// Declaration order is the physical top-to-bottom order on the card, so
/// `row as usize` is the row's index in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PunchRow {
    Twelve,
    Eleven,
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl PunchRow {
    /// All rows, top to bottom.
    pub const ALL: [PunchRow; 12] = [
        PunchRow::Twelve,
        PunchRow::Eleven,
        PunchRow::Zero,
        PunchRow::One,
        PunchRow::Two,
        PunchRow::Three,
        PunchRow::Four,
        PunchRow::Five,
        PunchRow::Six,
        PunchRow::Seven,
        PunchRow::Eight,
        PunchRow::Nine,
    ];

    /// The ten digit rows that carry printed row numbers.
    pub const DIGITS: [PunchRow; 10] = [
        PunchRow::Zero,
        PunchRow::One,
        PunchRow::Two,
        PunchRow::Three,
        PunchRow::Four,
        PunchRow::Five,
        PunchRow::Six,
        PunchRow::Seven,
        PunchRow::Eight,
        PunchRow::Nine,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            PunchRow::Twelve => "12",
            PunchRow::Eleven => "11",
            PunchRow::Zero => "0",
            PunchRow::One => "1",
            PunchRow::Two => "2",
            PunchRow::Three => "3",
            PunchRow::Four => "4",
            PunchRow::Five => "5",
            PunchRow::Six => "6",
            PunchRow::Seven => "7",
            PunchRow::Eight => "8",
            PunchRow::Nine => "9",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|row| row.label() == label)
    }
}

impl fmt::Display for PunchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PunchRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Every punched character of the table, in table order.
pub const TEST_PATTERN: &str = "&-0123456789ABCDEFGHIJKLMNOPQR/STUVWXYZ:#@'=\"[.<(+|]$*);^\\,%_>?";

/// EBCD punch rules (ref: https://homepage.divms.uiowa.edu/~jones/cards/codes.html).
///
/// Summary:
/// - Digits 0–9: punch the corresponding row
/// - A–I: 12 + 1–9; J–R: 11 + 1–9; S–Z: 0 + 2–9, with `/` as 0-1
/// - Punctuation: a single 2–7 digit row with 8, optionally under a 12/11/0 zone
/// - Space: no punches
#[rustfmt::skip]
pub static CODE_TABLE: &[(char, &[PunchRow])] = &[
    (' ', &[]),
    ('&', &[R12]),
    ('-', &[R11]),
    ('0', &[R0]),
    ('1', &[R1]),
    ('2', &[R2]),
    ('3', &[R3]),
    ('4', &[R4]),
    ('5', &[R5]),
    ('6', &[R6]),
    ('7', &[R7]),
    ('8', &[R8]),
    ('9', &[R9]),
    ('A', &[R12, R1]),
    ('B', &[R12, R2]),
    ('C', &[R12, R3]),
    ('D', &[R12, R4]),
    ('E', &[R12, R5]),
    ('F', &[R12, R6]),
    ('G', &[R12, R7]),
    ('H', &[R12, R8]),
    ('I', &[R12, R9]),
    ('J', &[R11, R1]),
    ('K', &[R11, R2]),
    ('L', &[R11, R3]),
    ('M', &[R11, R4]),
    ('N', &[R11, R5]),
    ('O', &[R11, R6]),
    ('P', &[R11, R7]),
    ('Q', &[R11, R8]),
    ('R', &[R11, R9]),
    ('/', &[R0, R1]),
    ('S', &[R0, R2]),
    ('T', &[R0, R3]),
    ('U', &[R0, R4]),
    ('V', &[R0, R5]),
    ('W', &[R0, R6]),
    ('X', &[R0, R7]),
    ('Y', &[R0, R8]),
    ('Z', &[R0, R9]),
    (':', &[R2, R8]),
    ('#', &[R3, R8]),
    ('@', &[R4, R8]),
    ('\'', &[R5, R8]),
    ('=', &[R6, R8]),
    ('"', &[R7, R8]),
    ('[', &[R12, R2, R8]),
    ('.', &[R12, R3, R8]),
    ('<', &[R12, R4, R8]),
    ('(', &[R12, R5, R8]),
    ('+', &[R12, R6, R8]),
    ('|', &[R12, R7, R8]),
    (']', &[R11, R2, R8]),
    ('$', &[R11, R3, R8]),
    ('*', &[R11, R4, R8]),
    (')', &[R11, R5, R8]),
    (';', &[R11, R6, R8]),
    ('^', &[R11, R7, R8]),
    ('\\', &[R0, R2, R8]),
    (',', &[R0, R3, R8]),
    ('%', &[R0, R4, R8]),
    ('_', &[R0, R5, R8]),
    ('>', &[R0, R6, R8]),
    ('?', &[R0, R7, R8]),
];

/// Rows punched for `ch`. Characters outside the table (lowercase included)
/// leave the column blank.
pub fn lookup(ch: char) -> &'static [PunchRow] {
    CODE_TABLE
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, rows)| *rows)
        .unwrap_or(&[])
}

/// Checks whether `ch` has an entry in the table (space counts).
pub fn is_encodable(ch: char) -> bool {
    CODE_TABLE.iter().any(|(c, _)| *c == ch)
}
