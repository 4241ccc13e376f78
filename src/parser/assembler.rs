use std::sync::LazyLock;

use regex::Regex;

use super::line::parse_test_line;
use super::record::TestRecord;

/// Trailing run of unit-shaped characters, anchored to the end of the line.
static TRAILING_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Za-z/%]+)$").unwrap());

/// Accumulates records across the lines of an OCR result.
///
/// At most one record is open at a time. A line that parses as a new
/// record seals the open one; a line that does not parse may only backfill
/// the open record's unit, and only while that unit is still empty. The
/// assembler is consumed by `finish`, so no state survives between runs.
pub struct RecordAssembler {
    sealed: Vec<TestRecord>,
    current: Option<TestRecord>,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self {
            sealed: Vec::new(),
            current: None,
        }
    }

    /// Feed one line of OCR text. Blank lines are skipped entirely.
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        tracing::trace!("Processing line: {}", line);

        match parse_test_line(line) {
            Some(record) => {
                tracing::debug!("Found test: {:?}", record);
                if let Some(open) = self.current.replace(record) {
                    self.sealed.push(open);
                }
            }
            None => {
                if let Some(open) = self.current.as_mut() {
                    backfill_unit(open, line);
                }
            }
        }
    }

    /// Seal the open record, if any, and return all records in the order
    /// their start lines appeared.
    pub fn finish(mut self) -> Vec<TestRecord> {
        if let Some(open) = self.current.take() {
            self.sealed.push(open);
        }
        self.sealed
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the unit from a continuation line. Applies only while the unit is
/// empty; any trailing run of unit characters is accepted without
/// validating it against known medical units.
fn backfill_unit(record: &mut TestRecord, line: &str) {
    if !record.test_unit.is_empty() {
        return;
    }

    if let Some(caps) = TRAILING_UNIT.captures(line) {
        record.test_unit = caps[1].trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Vec<TestRecord> {
        let mut assembler = RecordAssembler::new();
        for line in lines {
            assembler.push_line(line);
        }
        assembler.finish()
    }

    #[test]
    fn seals_previous_record_when_next_one_opens() {
        let records = run(&[
            "Hemoglobin 13.5 12.0 - 16.0 g/dL",
            "Glucose 180 70 - 99 mg/dL",
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test_name, "Hemoglobin");
        assert_eq!(records[1].test_name, "Glucose");
    }

    #[test]
    fn continuation_line_backfills_missing_unit() {
        let records = run(&["WBC Count 11.2 4.0 - 11.0", "K/uL"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_unit, "K/uL");
    }

    #[test]
    fn continuation_line_never_overwrites_a_unit() {
        let records = run(&["Hemoglobin 13.5 12.0 - 16.0 g/dL", "mg/dL"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_unit, "g/dL");
    }

    #[test]
    fn continuation_line_without_trailing_unit_changes_nothing() {
        // The line ends in a digit, so there is no trailing unit run
        let records = run(&["WBC Count 11.2 4.0 - 11.0", "see note 3"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_unit, "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = run(&[
            "",
            "Hemoglobin 13.5 12.0 - 16.0 g/dL",
            "   ",
            "Glucose 180 70 - 99 mg/dL",
            "\t",
        ]);

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn unmatched_line_with_no_open_record_is_ignored() {
        let records = run(&["PATIENT REPORT", "Hemoglobin 13.5 12.0 - 16.0 g/dL"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_name, "Hemoglobin");
    }

    #[test]
    fn finish_seals_the_last_open_record() {
        let records = run(&["Hemoglobin 13.5 12.0 - 16.0 g/dL"]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(run(&[]).is_empty());
        assert!(run(&["", "  "]).is_empty());
    }
}
