// Pseudo-array extraction
//
// The firmware hands tabular data to its page script as a series of
// assignments, one field per line:
//
//     STA_infos[0].mac=['00','11','22','33','44','55'];
//     STA_infos[0].RSSI=-52;
//
// `extract` groups those lines by index and returns, per index, the raw
// field values. Interpreting the values is left to the table-specific
// parsers in `wireless` and `dhcp`.

use std::collections::{BTreeMap, HashMap};

use tracing::{trace, warn};

/// Number of field lines the firmware writes per record.
///
/// Inferred from the O2 Box 1421 `lan_overview.htm` output for both
/// `STA_infos` and `dhcpclients`; nothing in the firmware guarantees it.
/// A different count makes the derived record count wrong, so re-derive it
/// from a fresh page before pointing this at other firmware.
pub const FIELDS_PER_RECORD: usize = 4;

/// How raw values are cleaned after the trailing `;` is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    /// Trim surrounding whitespace only.
    Trim,
    /// Drop every whitespace and quote character.
    Compact,
}

impl Cleanup {
    fn apply(self, value: &str) -> String {
        match self {
            Self::Trim => value.trim().to_owned(),
            Self::Compact => value
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | '"'))
                .collect(),
        }
    }
}

/// All fields found for one index of a pseudo-array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PseudoArrayRecord {
    fields: HashMap<String, String>,
}

impl PseudoArrayRecord {
    /// Raw value of `field`, if the page assigned it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: &str, value: String) {
        self.fields.insert(field.to_owned(), value);
    }
}

/// A single `prefix[index].field=value;` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub index: usize,
    pub field: &'a str,
    /// Value with the trailing `;` removed, otherwise untouched.
    pub value: &'a str,
}

/// Parse the first `prefix[index].field=value` statement on `line`.
///
/// The prefix must start on an identifier boundary, the index must be all
/// digits and be followed by `].`. Lines without `=` after the field path
/// are not assignments.
pub fn parse_assignment<'a>(line: &'a str, prefix: &str) -> Option<Assignment<'a>> {
    let open = format!("{prefix}[");
    let mut search_from = 0;

    while let Some(pos) = line[search_from..].find(&open) {
        let start = search_from + pos;
        search_from = start + open.len();

        let on_boundary = line[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        if !on_boundary {
            continue;
        }

        let rest = &line[search_from..];
        let Some((digits, after)) = rest.split_once("].") else {
            continue;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let Ok(index) = digits.parse::<usize>() else {
            continue;
        };

        let (field, value) = after.split_once('=')?;
        let value = match value.rfind(';') {
            Some(end) => &value[..end],
            None => value,
        };

        return Some(Assignment {
            index,
            field: field.trim(),
            value,
        });
    }

    None
}

/// Group the `prefix[i].field=value;` lines of a page by index.
///
/// Lines containing `exclude` are ignored, as are lines mentioning the
/// prefix without being a field assignment (declarations). The number of
/// records is derived as `matched / FIELDS_PER_RECORD`; assignments to an
/// index at or beyond that count are dropped. Within one index the last
/// assignment of a field wins.
pub fn extract<'a, I>(
    lines: I,
    prefix: &str,
    exclude: Option<&str>,
    cleanup: Cleanup,
) -> BTreeMap<usize, PseudoArrayRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let assignments: Vec<Assignment<'a>> = lines
        .into_iter()
        .filter(|line| exclude.is_none_or(|token| !line.contains(token)))
        .filter_map(|line| parse_assignment(line, prefix))
        .collect();

    let index_count = assignments.len() / FIELDS_PER_RECORD;
    if assignments.len() % FIELDS_PER_RECORD != 0 {
        warn!(
            prefix,
            lines = assignments.len(),
            expected_multiple = FIELDS_PER_RECORD,
            "pseudo-array line count is not a multiple of the record width"
        );
    }
    trace!(prefix, lines = assignments.len(), index_count, "matched pseudo-array lines");

    let mut records: BTreeMap<usize, PseudoArrayRecord> = BTreeMap::new();
    for assignment in assignments {
        if assignment.index >= index_count {
            trace!(prefix, index = assignment.index, "index beyond derived record count");
            continue;
        }
        records
            .entry(assignment.index)
            .or_default()
            .insert(assignment.field, cleanup.apply(assignment.value));
    }

    records
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn station_lines(count: usize) -> Vec<String> {
        (0..count)
            .flat_map(|i| {
                [
                    format!("STA_infos[{i}].mac=['00','11','22','33','44','{i:02}'];"),
                    format!("STA_infos[{i}].RSSI=-{};", 40 + i),
                    format!("STA_infos[{i}].rate={};", 54 * (i + 1)),
                    format!("STA_infos[{i}].ssid='home';"),
                ]
            })
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let records = extract(std::iter::empty(), "STA_infos", None, Cleanup::Trim);
        assert!(records.is_empty());
    }

    #[test]
    fn parses_single_assignment() {
        let a = parse_assignment("  STA_infos[3].RSSI=-48;", "STA_infos").unwrap();
        assert_eq!(a.index, 3);
        assert_eq!(a.field, "RSSI");
        assert_eq!(a.value, "-48");
    }

    #[test]
    fn value_may_contain_dots() {
        let a = parse_assignment("dhcpclients[0].name='nas.local';", "dhcpclients").unwrap();
        assert_eq!(a.field, "name");
        assert_eq!(a.value, "'nas.local'");
    }

    #[test]
    fn declarations_are_not_assignments() {
        assert!(parse_assignment("STA_infos[0] = new lan_client_t();", "STA_infos").is_none());
        assert!(parse_assignment("var STA_infos = new Array();", "STA_infos").is_none());
        assert!(parse_assignment("STA_infos[x].mac=1;", "STA_infos").is_none());
    }

    #[test]
    fn prefix_must_start_on_identifier_boundary() {
        assert!(parse_assignment("OLD_STA_infos[0].mac=1;", "STA_infos").is_none());
    }

    #[test]
    fn groups_four_lines_per_index() {
        let lines = station_lines(3);
        let records = extract(lines.iter().map(String::as_str), "STA_infos", None, Cleanup::Trim);

        assert_eq!(records.len(), 3);
        assert!(records[&0].get("mac").is_some());
        assert_eq!(records[&0].get("ssid"), Some("'home'"));
        assert_eq!(records[&2].get("RSSI"), Some("-42"));
        assert_eq!(records[&2].get("rate"), Some("162"));
    }

    #[test]
    fn index_one_does_not_pick_up_index_ten() {
        let lines = station_lines(12);
        let records = extract(lines.iter().map(String::as_str), "STA_infos", None, Cleanup::Trim);

        assert_eq!(records.len(), 12);
        assert_eq!(records[&1].get("RSSI"), Some("-41"));
        assert_eq!(records[&10].get("RSSI"), Some("-50"));
    }

    #[test]
    fn exclude_token_skips_lines() {
        let mut lines = station_lines(1);
        lines.push("STA_infos[0].mac=lan_client_t.mac;".into());
        let records = extract(
            lines.iter().map(String::as_str),
            "STA_infos",
            Some("lan_client_t"),
            Cleanup::Trim,
        );
        assert_eq!(
            records[&0].get("mac"),
            Some("['00','11','22','33','44','00']")
        );
    }

    #[test]
    fn last_assignment_wins() {
        let mut lines = station_lines(1);
        lines.insert(2, "STA_infos[0].RSSI=-99;".into());
        // Five lines still derive a single record.
        let records = extract(lines.iter().map(String::as_str), "STA_infos", None, Cleanup::Trim);
        assert_eq!(records[&0].get("RSSI"), Some("-99"));
    }

    #[test]
    fn compact_cleanup_drops_spaces_and_quotes() {
        let lines = [
            "dhcpclients[0].name = 'my laptop' ;",
            "dhcpclients[0].mac=['aa', 'bb'];",
            "dhcpclients[0].ip=[192, 168, 1, 7];",
            "dhcpclients[0].expires=3600;",
        ];
        let records = extract(lines, "dhcpclients", None, Cleanup::Compact);
        assert_eq!(records[&0].get("name"), Some("mylaptop"));
        assert_eq!(records[&0].get("mac"), Some("[aa,bb]"));
        assert_eq!(records[&0].get("ip"), Some("[192,168,1,7]"));
    }

    #[test]
    fn incomplete_trailing_group_is_dropped() {
        let mut lines = station_lines(2);
        lines.truncate(6);
        let records = extract(lines.iter().map(String::as_str), "STA_infos", None, Cleanup::Trim);
        assert_eq!(records.len(), 1);
        assert!(records.contains_key(&0));
    }
}
