//! Request-level entry points: normalize the two input strings, look up the
//! formula, resolve the root's intervals and read the notes off in formula order.

use guitarbuddy_types::{
    pitch, resolve_intervals, InputField, PitchTable, Scale, ScaleType, ValidationError,
};

/// Compute a spelled scale from user input.
///
/// `root` is trimmed and normalized (letter case, `s`/`♯`/`♭` accidentals)
/// before lookup and must be one of [`supported_roots`]; `scale_type` is matched case-insensitively.
pub fn compute_scale(root: &str, scale_type: &str) -> Result<Scale, ValidationError> {
    let root = root.trim();
    if root.is_empty() {
        return Err(ValidationError::MissingInput(InputField::Root));
    }
    if scale_type.trim().is_empty() {
        return Err(ValidationError::MissingInput(InputField::ScaleType));
    }
    let spelling = normalize_root(root)
        .ok_or_else(|| ValidationError::UnrecognizedRoot(root.to_string()))?;
    build_scale(&spelling, scale_type)
}

/// Build a scale from a root spelled exactly as in the pitch table, with at
/// most one accidental. Double-accidental spellings only occur as notes.
pub fn build_scale(root: &str, scale_type: &str) -> Result<Scale, ValidationError> {
    if root.trim().is_empty() {
        return Err(ValidationError::MissingInput(InputField::Root));
    }
    if scale_type.trim().is_empty() {
        return Err(ValidationError::MissingInput(InputField::ScaleType));
    }

    let scale_type: ScaleType = scale_type.parse()?;
    if !pitch::is_root_spelling(root) {
        return Err(ValidationError::UnrecognizedRoot(root.to_string()));
    }
    let map = resolve_intervals(root)
        .ok_or_else(|| ValidationError::UnrecognizedRoot(root.to_string()))?;

    let notes: Vec<String> = scale_type
        .formula()
        .iter()
        .map(|&interval| {
            if map.is_gap(interval) {
                log::warn!(
                    "{} {}: no spelling of {} on the expected letter, using {}",
                    root,
                    scale_type.id(),
                    interval,
                    map.get(interval)
                );
            }
            map.get(interval).to_string()
        })
        .collect();

    log::debug!("{} {} -> {:?}", root, scale_type.id(), notes);

    Ok(Scale {
        root: map.root().to_string(),
        name: scale_type.name().to_string(),
        notes,
    })
}

/// Map loosely typed root input onto a pitch-table spelling.
///
/// Returns `None` when the result is not a supported root.
pub fn normalize_root(input: &str) -> Option<String> {
    let mut chars = input.trim().chars();
    let letter = pitch::Letter::from_char(chars.next()?)?;

    let mut spelling = String::new();
    spelling.push(letter.as_char());
    for c in chars {
        match c {
            '#' | '♯' | 's' | 'S' => spelling.push('#'),
            'b' | 'B' | '♭' => spelling.push('b'),
            _ => return None,
        }
    }

    if !pitch::is_root_spelling(&spelling) {
        return None;
    }
    PitchTable::STANDARD.find_index(&spelling)?;
    Some(spelling)
}

/// Every root spelling `compute_scale` accepts, in pitch-table order.
pub fn supported_roots() -> Vec<&'static str> {
    PitchTable::STANDARD.roots().collect()
}
