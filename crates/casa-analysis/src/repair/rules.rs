//! Individual repair rules. Each returns `Some(new_value)` when it changes
//! the field and `None` when the field should stay as it is.

/// Bedrooms from area when missing or non-positive: clamp(round(area / 45), 1, 4).
pub fn impute_bedrooms(
    bedrooms: Option<f64>,
    area: f64,
    area_per_bedroom: f64,
    max_bedrooms: f64,
) -> Option<f64> {
    let missing = bedrooms.map_or(true, |b| b <= 0.0);
    if !missing || !(area > 0.0 && area.is_finite()) {
        return None;
    }
    Some((area / area_per_bedroom).round().clamp(1.0, max_bedrooms))
}

/// Bathrooms from bedrooms when missing or non-positive: min(bedrooms · 1.5, bedrooms + 1).
pub fn impute_bathrooms(bathrooms: Option<f64>, bedrooms: Option<f64>) -> Option<f64> {
    let missing = bathrooms.map_or(true, |b| b <= 0.0);
    let bedrooms = bedrooms.filter(|b| *b > 0.0)?;
    missing.then(|| (bedrooms * 1.5).min(bedrooms + 1.0))
}

/// Parking from bedrooms when missing or negative: min(bedrooms, bedrooms + 1).
pub fn impute_parking(parking: Option<f64>, bedrooms: Option<f64>) -> Option<f64> {
    let missing = parking.map_or(true, |p| p < 0.0);
    let bedrooms = bedrooms.filter(|b| *b > 0.0)?;
    missing.then(|| bedrooms.min(bedrooms + 1.0))
}

/// "25" captured for "2.5": a bathroom count ≥ 10 that is a multiple of 5 is
/// divided by 10. The shifted value must itself fall below 10.
pub fn correct_decimal_shift_bathrooms(bathrooms: Option<f64>) -> Option<f64> {
    let b = bathrooms?;
    if b < 10.0 || !is_multiple_of(b, 5.0) {
        return None;
    }
    let shifted = b / 10.0;
    (shifted < 10.0).then_some(shifted)
}

/// A parking count ≥ 10 is divided by 10 when the result is at most `max_parking`.
pub fn correct_decimal_shift_parking(parking: Option<f64>, max_parking: f64) -> Option<f64> {
    let p = parking?;
    if p < 10.0 {
        return None;
    }
    let shifted = p / 10.0;
    (shifted <= max_parking).then_some(shifted)
}

/// Age captured as a construction year, or with a spurious trailing digit.
///
/// - `1900 < age <= reference_year`: a year, converted to `reference_year − age`.
/// - `age >= 1000`: divided by 10 when the result is at most `max_age`.
/// - Anything else above 100 is left for downstream rejection.
pub fn correct_age(age: Option<f64>, reference_year: i32, max_age: f64) -> Option<f64> {
    let a = age?;
    let year = f64::from(reference_year);
    if a > 1900.0 && a <= year {
        return Some(year - a);
    }
    if a >= 1000.0 {
        let shifted = a / 10.0;
        return (shifted <= max_age).then_some(shifted);
    }
    None
}

fn is_multiple_of(value: f64, divisor: f64) -> bool {
    (value % divisor).abs() < 1e-9
}
