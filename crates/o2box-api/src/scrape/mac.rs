//! MAC address normalization.

/// Turn the firmware's byte-list form into colon-separated hex.
///
/// `['00','11','22','aa','bb','cc']` becomes `00:11:22:aa:bb:cc`. Brackets and
/// quotes are dropped, tokens are trimmed and joined with `:` in their original
/// order and case. Tokens are not checked for being valid hex pairs; garbage in
/// gives a garbage MAC out.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();

    stripped
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(":")
}
