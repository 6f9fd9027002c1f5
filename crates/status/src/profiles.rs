//! Parsing of `netbird profile list` output.

/// Extracts profile names from the profile list output.
///
/// The first line is a count header (`Found 2 profiles:`) and is skipped.
/// Each remaining line is `<glyph> <name>`; lines without both parts are
/// ignored. Order and duplicates are preserved.
pub fn parse_profile_list(raw: &str) -> Vec<String> {
    raw.trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let (_glyph, name) = line.trim().split_once(char::is_whitespace)?;
            let name = name.trim_start();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}
