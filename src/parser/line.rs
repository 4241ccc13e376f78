use std::sync::LazyLock;

use regex::Regex;

use super::record::TestRecord;

// The three recognized line shapes, tried in strict order with the first
// hit winning. Later patterns are deliberately less specific fallbacks, so
// the order must not change. All three are searched anywhere in the line:
// a record may be embedded in a longer line with arbitrary prefix/suffix.

/// Name, value, reference range, unit
static NAME_VALUE_RANGE_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z\s()]+)\s*([\d.]+)\s*([\d.]+)\s*-\s*([\d.]+)\s*([A-Za-z/%]+)").unwrap()
});

/// Name, value, unit, reference range
static NAME_VALUE_UNIT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z\s()]+)\s*([\d.]+)\s*([A-Za-z/%]+)\s*([\d.]+)\s*-\s*([\d.]+)").unwrap()
});

/// Name, value, reference range, no unit
static NAME_VALUE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z\s()]+)\s*([\d.]+)\s*([\d.]+)\s*-\s*([\d.]+)").unwrap());

/// Attempt to parse a line as the start of a new test record.
///
/// A numeric capture that does not parse as a decimal disqualifies that
/// pattern only; the next pattern is tried. A line matching no pattern
/// yields `None`, which the assembler treats as continuation data.
pub fn parse_test_line(line: &str) -> Option<TestRecord> {
    if let Some(caps) = NAME_VALUE_RANGE_UNIT.captures(line) {
        if let Some(record) = build_record(&caps[1], &caps[2], &caps[3], &caps[4], &caps[5]) {
            return Some(record);
        }
    }

    if let Some(caps) = NAME_VALUE_UNIT_RANGE.captures(line) {
        if let Some(record) = build_record(&caps[1], &caps[2], &caps[4], &caps[5], &caps[3]) {
            return Some(record);
        }
    }

    if let Some(caps) = NAME_VALUE_RANGE.captures(line) {
        if let Some(record) = build_record(&caps[1], &caps[2], &caps[3], &caps[4], "") {
            return Some(record);
        }
    }

    None
}

fn build_record(
    name: &str,
    value: &str,
    ref_min: &str,
    ref_max: &str,
    unit: &str,
) -> Option<TestRecord> {
    let value: f64 = value.parse().ok()?;
    let ref_min: f64 = ref_min.parse().ok()?;
    let ref_max: f64 = ref_max.parse().ok()?;

    Some(TestRecord::new(name, value, ref_min, ref_max, unit))
}
