//! Conversion between the glyph notation users type and the canonical token
//! text the parser reads.
//!
//! | glyph | canonical |
//! |-------|-----------|
//! | `∧`   | `&`       |
//! | `∨`   | `\|`      |
//! | `¬`   | `~`       |
//! | `→`   | `>>`      |
//! | `↔`   | `<<`      |
//!
//! Both directions are plain substitutions; no validation happens here.

/// (glyph, canonical token) pairs.
pub const GLYPHS: [(&str, &str); 5] = [
    ("∧", "&"),
    ("∨", "|"),
    ("¬", "~"),
    ("→", ">>"),
    ("↔", "<<"),
];

/// Trims `text` and replaces every logical glyph with its canonical token.
pub fn to_canonical(text: &str) -> String {
    let canonical = GLYPHS
        .iter()
        .fold(text.trim().to_string(), |acc, (glyph, token)| {
            acc.replace(glyph, token)
        });

    log::debug!("translated {text:?} to {canonical:?}");

    canonical
}

/// Replaces every canonical token in `text` with its glyph, for display.
pub fn to_unicode(text: &str) -> String {
    GLYPHS
        .iter()
        .fold(text.trim().to_string(), |acc, (glyph, token)| {
            acc.replace(token, glyph)
        })
}
