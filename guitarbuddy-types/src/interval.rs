//! Interval labels and the resolver that spells them against a root.

use std::fmt;

use crate::pitch::{letter_of, rotate_alphabet, PitchTable};

/// A recognized scale-degree label.
///
/// Variants are grouped by semitone distance from the root; labels in the same
/// group sound the same but are written on different letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interval {
    Root,
    FlatTwo,
    FlatNine,
    Two,
    Nine,
    FlatThree,
    SharpTwo,
    SharpNine,
    Three,
    Four,
    Eleven,
    SharpFour,
    FlatFive,
    SharpEleven,
    Five,
    SharpFive,
    FlatSix,
    FlatThirteen,
    Six,
    Thirteen,
    FlatSeven,
    Seven,
    Octave,
}

impl Interval {
    pub const COUNT: usize = 23;

    pub const ALL: [Interval; Interval::COUNT] = [
        Interval::Root,
        Interval::FlatTwo,
        Interval::FlatNine,
        Interval::Two,
        Interval::Nine,
        Interval::FlatThree,
        Interval::SharpTwo,
        Interval::SharpNine,
        Interval::Three,
        Interval::Four,
        Interval::Eleven,
        Interval::SharpFour,
        Interval::FlatFive,
        Interval::SharpEleven,
        Interval::Five,
        Interval::SharpFive,
        Interval::FlatSix,
        Interval::FlatThirteen,
        Interval::Six,
        Interval::Thirteen,
        Interval::FlatSeven,
        Interval::Seven,
        Interval::Octave,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Interval::Root => "1",
            Interval::FlatTwo => "b2",
            Interval::FlatNine => "b9",
            Interval::Two => "2",
            Interval::Nine => "9",
            Interval::FlatThree => "b3",
            Interval::SharpTwo => "#2",
            Interval::SharpNine => "#9",
            Interval::Three => "3",
            Interval::Four => "4",
            Interval::Eleven => "11",
            Interval::SharpFour => "#4",
            Interval::FlatFive => "b5",
            Interval::SharpEleven => "#11",
            Interval::Five => "5",
            Interval::SharpFive => "#5",
            Interval::FlatSix => "b6",
            Interval::FlatThirteen => "b13",
            Interval::Six => "6",
            Interval::Thirteen => "13",
            Interval::FlatSeven => "b7",
            Interval::Seven => "7",
            Interval::Octave => "8",
        }
    }

    /// The number in the label with accidentals stripped (1-8, 9, 11 or 13).
    pub fn degree(self) -> u8 {
        match self {
            Interval::Root => 1,
            Interval::FlatTwo | Interval::Two | Interval::SharpTwo => 2,
            Interval::FlatThree | Interval::Three => 3,
            Interval::Four | Interval::SharpFour => 4,
            Interval::FlatFive | Interval::Five | Interval::SharpFive => 5,
            Interval::FlatSix | Interval::Six => 6,
            Interval::FlatSeven | Interval::Seven => 7,
            Interval::Octave => 8,
            Interval::FlatNine | Interval::Nine | Interval::SharpNine => 9,
            Interval::Eleven | Interval::SharpEleven => 11,
            Interval::FlatThirteen | Interval::Thirteen => 13,
        }
    }

    /// Semitones above the root (0-12).
    pub fn semitones(self) -> u8 {
        match self {
            Interval::Root => 0,
            Interval::FlatTwo | Interval::FlatNine => 1,
            Interval::Two | Interval::Nine => 2,
            Interval::FlatThree | Interval::SharpTwo | Interval::SharpNine => 3,
            Interval::Three => 4,
            Interval::Four | Interval::Eleven => 5,
            Interval::SharpFour | Interval::FlatFive | Interval::SharpEleven => 6,
            Interval::Five => 7,
            Interval::SharpFive | Interval::FlatSix | Interval::FlatThirteen => 8,
            Interval::Six | Interval::Thirteen => 9,
            Interval::FlatSeven => 10,
            Interval::Seven => 11,
            Interval::Octave => 12,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Every interval spelled against one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalMap {
    root: &'static str,
    notes: [&'static str; Interval::COUNT],
    gaps: Vec<Interval>,
}

impl IntervalMap {
    /// Root spelling as found in the pitch table.
    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn get(&self, interval: Interval) -> &'static str {
        self.notes[interval.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Interval, &'static str)> + '_ {
        Interval::ALL.iter().map(move |&i| (i, self.get(i)))
    }

    /// Intervals where no candidate carried the expected letter and the
    /// first spelling of the class was used instead.
    pub fn gaps(&self) -> &[Interval] {
        &self.gaps
    }

    pub fn is_gap(&self, interval: Interval) -> bool {
        self.gaps.contains(&interval)
    }
}

/// Spell every interval above `root` using the standard pitch table.
pub fn resolve_intervals(root: &str) -> Option<IntervalMap> {
    resolve_intervals_with(&PitchTable::STANDARD, root)
}

/// Spell every interval above `root` against `table`.
///
/// Returns `None` if `root` is not a spelling in the table.
pub fn resolve_intervals_with(table: &PitchTable, root: &str) -> Option<IntervalMap> {
    let chromatic = table.rotate(root)?;
    let alphabet = rotate_alphabet(letter_of(root)?);
    let root = chromatic
        .get(0)
        .spellings()
        .iter()
        .copied()
        .find(|s| *s == root)?;

    let mut notes = [""; Interval::COUNT];
    let mut gaps = Vec::new();

    for interval in Interval::ALL {
        let expected = alphabet.for_degree(interval.degree());
        let class = chromatic.get(interval.semitones() as usize);
        notes[interval.slot()] = match class.spelling_on(expected) {
            Some(spelling) => spelling,
            None => {
                log::debug!(
                    "{} above {}: no spelling on {} in {:?}, using {}",
                    interval,
                    root,
                    expected,
                    class.spellings(),
                    class.first()
                );
                gaps.push(interval);
                class.first()
            }
        };
    }

    Some(IntervalMap { root, notes, gaps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::accidental_count;
    use std::collections::HashSet;

    #[test]
    fn all_matches_declaration_order() {
        for (slot, interval) in Interval::ALL.iter().enumerate() {
            assert_eq!(interval.slot(), slot);
        }
    }

    #[test]
    fn labels_unique() {
        let labels: HashSet<&str> = Interval::ALL.iter().map(|i| i.label()).collect();
        assert_eq!(labels.len(), Interval::COUNT);
    }

    #[test]
    fn thirteen_semitone_groups() {
        let groups: HashSet<u8> = Interval::ALL.iter().map(|i| i.semitones()).collect();
        assert_eq!(groups.len(), 13);
        assert_eq!(groups.iter().max(), Some(&12));
    }

    #[test]
    fn label_number_matches_degree() {
        for interval in Interval::ALL {
            let digits: String = interval.label().chars().filter(|c| c.is_ascii_digit()).collect();
            assert_eq!(digits.parse::<u8>().unwrap(), interval.degree());
        }
    }

    #[test]
    fn c_resolves_to_expected_spellings() {
        let map = resolve_intervals("C").unwrap();
        assert_eq!(map.get(Interval::Root), "C");
        assert_eq!(map.get(Interval::FlatTwo), "Db");
        assert_eq!(map.get(Interval::FlatNine), "Db");
        assert_eq!(map.get(Interval::SharpTwo), "D#");
        assert_eq!(map.get(Interval::FlatThree), "Eb");
        assert_eq!(map.get(Interval::SharpFour), "F#");
        assert_eq!(map.get(Interval::FlatFive), "Gb");
        assert_eq!(map.get(Interval::SharpFive), "G#");
        assert_eq!(map.get(Interval::FlatSix), "Ab");
        assert_eq!(map.get(Interval::Thirteen), "A");
        assert_eq!(map.get(Interval::FlatSeven), "Bb");
        assert_eq!(map.get(Interval::Octave), "C");
        assert!(map.gaps().is_empty());
    }

    #[test]
    fn aliases_share_letters_with_base_degree() {
        let map = resolve_intervals("Eb").unwrap();
        assert_eq!(map.get(Interval::Nine), map.get(Interval::Two));
        assert_eq!(map.get(Interval::Eleven), map.get(Interval::Four));
        assert_eq!(map.get(Interval::Thirteen), map.get(Interval::Six));
        assert_eq!(map.get(Interval::SharpEleven), map.get(Interval::SharpFour));
    }

    #[test]
    fn enharmonic_labels_differ_in_letter() {
        let map = resolve_intervals("D").unwrap();
        assert_eq!(map.get(Interval::SharpFour), "G#");
        assert_eq!(map.get(Interval::FlatFive), "Ab");
    }

    #[test]
    fn unknown_root_is_none() {
        assert!(resolve_intervals("H").is_none());
        assert!(resolve_intervals("").is_none());
    }

    #[test]
    fn map_root_is_table_spelling() {
        let map = resolve_intervals("Gb").unwrap();
        assert_eq!(map.root(), "Gb");
        assert_eq!(map.iter().count(), Interval::COUNT);
    }

    #[test]
    fn double_sharp_spellings_for_sharp_roots() {
        let map = resolve_intervals("B#").unwrap();
        assert_eq!(map.get(Interval::Two), "C##");
        assert_eq!(map.get(Interval::Three), "D##");
        assert_eq!(map.get(Interval::Seven), "A##");
    }

    #[test]
    fn single_accidental_roots_spell_plain_degrees() {
        let plain = [
            Interval::Root,
            Interval::FlatTwo,
            Interval::Two,
            Interval::FlatThree,
            Interval::Three,
            Interval::Four,
            Interval::SharpFour,
            Interval::FlatFive,
            Interval::Five,
            Interval::FlatSix,
            Interval::Six,
            Interval::FlatSeven,
            Interval::Seven,
            Interval::Octave,
        ];
        for root in PitchTable::STANDARD.spellings().filter(|s| accidental_count(s) <= 1) {
            let map = resolve_intervals(root).unwrap();
            for interval in plain {
                assert!(!map.is_gap(interval), "{} above {}", interval, root);
            }
        }
    }

    #[test]
    fn double_accidental_root_can_run_out_of_spellings() {
        // Bbbb is not in the table
        let map = resolve_intervals("Dbb").unwrap();
        assert!(map.is_gap(Interval::FlatSix));
        assert!(!map.is_gap(Interval::Six));
        assert_eq!(map.get(Interval::Six), "Bbb");
    }

    #[test]
    fn fallback_uses_first_candidate() {
        let mut raw = PitchTable::STANDARD.classes().map(|pc| pc.spellings());
        raw[6] = &["E##", "Gb"];
        let table = PitchTable::new(raw).unwrap();

        let map = resolve_intervals_with(&table, "G").unwrap();
        assert_eq!(map.get(Interval::Seven), "E##");
        assert!(map.is_gap(Interval::Seven));
        assert!(!map.is_gap(Interval::Six));
        assert_eq!(map.get(Interval::Six), "E");
    }

    #[test]
    fn fallback_never_leaves_empty_entries() {
        let mut raw = PitchTable::STANDARD.classes().map(|pc| pc.spellings());
        raw[2] = &["Ebb", "C##"];
        raw[9] = &["Bbb", "G##"];
        let table = PitchTable::new(raw).unwrap();

        let map = resolve_intervals_with(&table, "C").unwrap();
        assert_eq!(map.get(Interval::Two), "Ebb");
        assert_eq!(map.get(Interval::Six), "Bbb");
        assert!(map.iter().all(|(_, note)| !note.is_empty()));
        assert!(map.gaps().contains(&Interval::Two));
        assert!(map.gaps().contains(&Interval::Nine));
    }
}
