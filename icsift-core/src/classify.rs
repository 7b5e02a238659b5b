//! Classification of event labels into single-character type codes.

/// Code assigned to labels that are not in the classification table.
pub const UNCLASSIFIED: char = 'x';

/// Map an event label to its single-character classification code.
///
/// Lookup is exact and case-sensitive (labels come from the feed verbatim,
/// including non-ASCII ones). Unknown labels map to [`UNCLASSIFIED`].
pub fn classification(label: &str) -> char {
    match label {
        "loeng" => 'l',
        "praktikum" => 'p',
        "seminar" => 's',
        "praktika" => 'i',
        "e-õpe" => 'e',
        "kontrolltöö" => 'k',
        "kollokvium" => 'q',
        "eksam/arvestus" => 'a',
        "korduseksam" => 'a',
        "konsultatsioon" => 'c',
        _ => UNCLASSIFIED,
    }
}
