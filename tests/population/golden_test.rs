use chrono::NaiveDate;
use cardio_synth::Result;
use cardio_synth::schema::population_schema;

use crate::utils::{population, records};

#[test]
fn test_ten_patients_seed_42_identity_column() -> Result<()> {
    let rows = records(10, 42)?;
    let ids: Vec<&str> = rows.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "SN000001", "SN000002", "SN000003", "SN000004", "SN000005", "SN000006", "SN000007",
            "SN000008", "SN000009", "SN000010",
        ]
    );
    Ok(())
}

#[test]
fn test_ten_patients_seed_42_ldl_formula() -> Result<()> {
    for row in records(10, 42)? {
        let expected = (row.total_cholesterol_mg_dl - row.hdl_mg_dl - 30).clamp(50, 200);
        assert_eq!(row.ldl_mg_dl, expected, "LDL of {}", row.patient_id);
    }
    Ok(())
}

/// Leading rows of the N=10, seed 42 table:
/// (patient id, sex, age, systolic bp, total cholesterol, consultation date)
const SEED_42_ROWS: &[(&str, &str, i32, i32, i32, &str)] = &[
    ("SN000001", "F", 77, 153, 145, "2022-01-29"),
    ("SN000002", "F", 69, 126, 251, "2020-09-10"),
];

#[test]
fn test_ten_patients_seed_42_match_recorded_values() -> Result<()> {
    let rows = records(10, 42)?;
    for (row, expected) in rows.iter().zip(SEED_42_ROWS) {
        let (id, sex, age, systolic, cholesterol, date) = *expected;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        assert_eq!(
            (
                row.patient_id.as_str(),
                row.sex.as_str(),
                row.age,
                row.systolic_bp,
                row.total_cholesterol_mg_dl,
                row.consultation_date,
            ),
            (id, sex, age, systolic, cholesterol, date),
            "recorded values of {id}"
        );
    }
    Ok(())
}

#[test]
fn test_ten_patients_seed_42_is_a_fixed_table() -> Result<()> {
    let first = records(10, 42)?;
    let second = records(10, 42)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_ten_patients_have_full_schema() -> Result<()> {
    let batch = population(10, 42)?;
    assert_eq!(batch.num_rows(), 10);
    assert_eq!(batch.schema(), population_schema());
    Ok(())
}
