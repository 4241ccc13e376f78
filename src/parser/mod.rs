//! OCR text parsing
//!
//! Turns the noisy line-oriented text produced by OCR into structured
//! `TestRecord`s. Each non-blank line is either the start of a new record
//! (matched by one of three ordered patterns) or continuation data for the
//! most recently opened record.

mod assembler;
mod line;
mod record;

pub use assembler::RecordAssembler;
pub use line::parse_test_line;
pub use record::TestRecord;

/// Extract all lab tests from a block of OCR text, in order of appearance.
pub fn extract_lab_tests(text: &str) -> Vec<TestRecord> {
    let mut assembler = RecordAssembler::new();
    for line in text.lines() {
        assembler.push_line(line);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_records_in_order_of_appearance() {
        let text = "LABORATORY REPORT\n\
                    Hemoglobin 13.5 12.0 - 16.0 g/dL\n\
                    Glucose 180 70 - 99 mg/dL\n\
                    WBC Count 11.2 4.0 - 11.0\n\
                    K/uL\n";

        let records = extract_lab_tests(text);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].test_name, "Hemoglobin");
        assert_eq!(records[1].test_name, "Glucose");
        assert_eq!(records[2].test_name, "WBC Count");
        assert_eq!(records[2].test_unit, "K/uL");
    }

    #[test]
    fn whitespace_only_text_yields_no_records() {
        assert!(extract_lab_tests("").is_empty());
        assert!(extract_lab_tests("\n  \n\t\n").is_empty());
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "Hemoglobin 13.5 12.0 - 16.0 g/dL\nWBC Count 11.2 4.0 - 11.0\nK/uL\n";

        let first = extract_lab_tests(text);
        let second = extract_lab_tests(text);

        assert_eq!(first, second);
    }
}
