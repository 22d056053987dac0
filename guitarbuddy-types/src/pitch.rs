//! Pitch classes, letters, and the two rotators the interval resolver is built on.
//!
//! Twelve pitch classes but only seven letters: every class carries the set of
//! spellings it can appear under, and the resolver picks between them by letter.

use std::fmt;

/// One of the seven letter names, in canonical A..G order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::A,
        Letter::B,
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
    ];

    /// Position in the canonical A..G sequence.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive conversion from a single character.
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Letter a spelling is written on, taken from its first character.
pub fn letter_of(spelling: &str) -> Option<Letter> {
    spelling.chars().next().and_then(Letter::from_char)
}

/// The letter sequence rotated to start at a root letter.
///
/// Stores only the starting offset; lookups wrap with `% 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatedAlphabet {
    start: usize,
}

impl RotatedAlphabet {
    /// Letter `offset` steps above the root.
    pub fn get(&self, offset: usize) -> Letter {
        Letter::ALL[(self.start + offset) % Letter::ALL.len()]
    }

    /// Expected letter for a 1-based scale degree. Degrees above 7 wrap, so
    /// 8 lands on the root letter and 9/11/13 on the letters of 2/4/6.
    pub fn for_degree(&self, degree: u8) -> Letter {
        self.get((degree.max(1) as usize - 1) % Letter::ALL.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        (0..Letter::ALL.len()).map(move |offset| self.get(offset))
    }
}

pub fn rotate_alphabet(root: Letter) -> RotatedAlphabet {
    RotatedAlphabet { start: root.index() }
}

/// A pitch class and every spelling accepted for it.
///
/// Spellings are kept in declaration order; the first one is what the
/// resolver falls back to when no spelling carries the expected letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchClass {
    spellings: &'static [&'static str],
}

impl PitchClass {
    pub const fn new(spellings: &'static [&'static str]) -> Self {
        Self { spellings }
    }

    pub fn spellings(&self) -> &'static [&'static str] {
        self.spellings
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.spellings.contains(&spelling)
    }

    /// The spelling written on `letter`, if this class has one.
    pub fn spelling_on(&self, letter: Letter) -> Option<&'static str> {
        self.spellings
            .iter()
            .copied()
            .find(|s| letter_of(s) == Some(letter))
    }

    /// First spelling in declaration order.
    pub fn first(&self) -> &'static str {
        self.spellings[0]
    }
}

/// Problems found when validating a custom pitch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A class with no spellings (index of the class).
    EmptyClass(usize),
    /// A spelling listed in more than one class.
    DuplicateSpelling(&'static str),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyClass(index) => write!(f, "pitch class {} has no spellings", index),
            Self::DuplicateSpelling(s) => write!(f, "spelling '{}' appears in more than one pitch class", s),
        }
    }
}

impl std::error::Error for TableError {}

/// The twelve pitch classes, index 0 = C, ascending by semitone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchTable {
    classes: [PitchClass; 12],
}

impl PitchTable {
    pub const STANDARD: PitchTable = PitchTable {
        classes: [
            PitchClass::new(&["B#", "C", "Dbb"]),
            PitchClass::new(&["B##", "C#", "Db"]),
            PitchClass::new(&["C##", "D", "Ebb"]),
            PitchClass::new(&["D#", "Eb", "Fbb"]),
            PitchClass::new(&["D##", "E", "Fb"]),
            PitchClass::new(&["E#", "F", "Gbb"]),
            PitchClass::new(&["E##", "F#", "Gb"]),
            PitchClass::new(&["F##", "G", "Abb"]),
            PitchClass::new(&["G#", "Ab"]),
            PitchClass::new(&["G##", "A", "Bbb"]),
            PitchClass::new(&["A#", "Bb", "Cbb"]),
            PitchClass::new(&["A##", "B", "Cb"]),
        ],
    };

    /// Build a table from raw spelling sets, rejecting empty classes and
    /// spellings shared between classes.
    pub fn new(spellings: [&'static [&'static str]; 12]) -> Result<Self, TableError> {
        let mut seen: Vec<&'static str> = Vec::new();
        for (index, set) in spellings.iter().enumerate() {
            if set.is_empty() {
                return Err(TableError::EmptyClass(index));
            }
            for &s in set.iter() {
                if seen.contains(&s) {
                    return Err(TableError::DuplicateSpelling(s));
                }
                seen.push(s);
            }
        }
        Ok(Self {
            classes: spellings.map(PitchClass::new),
        })
    }

    pub fn classes(&self) -> &[PitchClass; 12] {
        &self.classes
    }

    pub fn class(&self, index: usize) -> &PitchClass {
        &self.classes[index % 12]
    }

    /// Every recognized spelling, in table order.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.iter().flat_map(|pc| pc.spellings().iter().copied())
    }

    /// Spellings accepted as scale roots: at most one accidental. Every
    /// formula resolves above these without running out of spellings.
    pub fn roots(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.spellings().filter(|s| is_root_spelling(s))
    }

    /// Index of the class holding `spelling` (exact match).
    pub fn find_index(&self, spelling: &str) -> Option<usize> {
        self.classes.iter().position(|pc| pc.contains(spelling))
    }

    /// View of the table starting at the class of `root`.
    pub fn rotate(&self, root: &str) -> Option<RotatedChromatic<'_>> {
        let start = self.find_index(root)?;
        Some(RotatedChromatic { table: self, start })
    }
}

/// The pitch table read from a root's class upwards, wrapping at 12.
#[derive(Debug, Clone, Copy)]
pub struct RotatedChromatic<'a> {
    table: &'a PitchTable,
    start: usize,
}

impl<'a> RotatedChromatic<'a> {
    /// Class `semitones` above the root.
    pub fn get(&self, semitones: usize) -> &'a PitchClass {
        self.table.class(self.start + semitones)
    }

    /// Index of the root's class in the unrotated table.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PitchClass> + '_ {
        (0..12).map(move |offset| self.get(offset))
    }
}

pub fn find_pitch_class_index(spelling: &str) -> Option<usize> {
    PitchTable::STANDARD.find_index(spelling)
}

pub fn rotate_chromatic(root: &str) -> Option<RotatedChromatic<'static>> {
    PitchTable::STANDARD.rotate(root)
}

/// Number of accidental characters after the letter.
pub fn accidental_count(spelling: &str) -> usize {
    spelling.chars().skip(1).count()
}

/// Whether `spelling` can start a scale. Double-accidental spellings only
/// appear as scale notes.
pub fn is_root_spelling(spelling: &str) -> bool {
    accidental_count(spelling) <= 1
}

/// Render `#` and `b` accidentals as `♯` and `♭` for display.
pub fn to_unicode(spelling: &str) -> String {
    let mut chars = spelling.chars();
    let mut out = String::with_capacity(spelling.len() + 4);
    if let Some(letter) = chars.next() {
        out.push(letter);
    }
    for c in chars {
        match c {
            '#' => out.push('♯'),
            'b' => out.push('♭'),
            other => out.push(other),
        }
    }
    out
}
