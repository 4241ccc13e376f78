use serde::{Deserialize, Serialize};

/// A single extracted lab test.
///
/// `test_unit` may be empty when the report puts the unit on its own line;
/// the assembler backfills it from the following line in that case. All
/// other fields are fixed once the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_name: String,
    pub test_value: String,
    pub bio_reference_range: String,
    pub test_unit: String,
    pub lab_test_out_of_range: bool,
}

impl TestRecord {
    /// Build a record from parsed fields. The out-of-range flag is derived
    /// here: a value equal to either bound counts as in range.
    pub fn new(name: &str, value: f64, ref_min: f64, ref_max: f64, unit: &str) -> Self {
        Self {
            test_name: name.trim().to_string(),
            test_value: format_decimal(value),
            bio_reference_range: format!(
                "{}-{}",
                format_decimal(ref_min),
                format_decimal(ref_max)
            ),
            test_unit: unit.trim().to_string(),
            lab_test_out_of_range: !(ref_min <= value && value <= ref_max),
        }
    }
}

/// Render a parsed number as a decimal string: whole numbers keep a
/// trailing `.0` (`180` -> `"180.0"`), fractional values print as-is
/// (`13.5` -> `"13.5"`).
pub(crate) fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_inside_range_is_in_range() {
        let record = TestRecord::new("Hemoglobin", 13.5, 12.0, 16.0, "g/dL");
        assert!(!record.lab_test_out_of_range);
    }

    #[test]
    fn boundary_values_are_in_range() {
        assert!(!TestRecord::new("Calcium", 8.5, 8.5, 10.5, "mg/dL").lab_test_out_of_range);
        assert!(!TestRecord::new("Calcium", 10.5, 8.5, 10.5, "mg/dL").lab_test_out_of_range);
    }

    #[test]
    fn values_strictly_outside_range_are_flagged() {
        assert!(TestRecord::new("Glucose", 180.0, 70.0, 99.0, "mg/dL").lab_test_out_of_range);
        assert!(TestRecord::new("Glucose", 55.0, 70.0, 99.0, "mg/dL").lab_test_out_of_range);
    }

    #[test]
    fn fields_are_trimmed_and_formatted() {
        let record = TestRecord::new("Glucose ", 180.0, 70.0, 99.0, " mg/dL");
        assert_eq!(record.test_name, "Glucose");
        assert_eq!(record.test_value, "180.0");
        assert_eq!(record.bio_reference_range, "70.0-99.0");
        assert_eq!(record.test_unit, "mg/dL");
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(format_decimal(13.5), "13.5");
        assert_eq!(format_decimal(180.0), "180.0");
        assert_eq!(format_decimal(0.9), "0.9");
    }

    #[test]
    fn serializes_to_wire_shape() {
        let record = TestRecord::new("WBC Count", 11.2, 4.0, 11.0, "");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["test_name"], "WBC Count");
        assert_eq!(json["test_value"], "11.2");
        assert_eq!(json["bio_reference_range"], "4.0-11.0");
        assert_eq!(json["test_unit"], "");
        assert_eq!(json["lab_test_out_of_range"], true);
    }
}
