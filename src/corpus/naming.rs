use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CorpusError;

// Segment ids look like `DavidRockwell_2002-49.484-50.449`: talk name,
// then start and end offsets in seconds.
static SEGMENT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<talk>[A-Za-z0-9_.]+)-(?P<start>[0-9.]+)-(?P<end>[0-9.]+)$")
        .expect("Invalid regex")
});

/// Generates the standardised filename for a segment id.
///
/// Raw start/end offsets from the corpus can differ by representation or
/// rounding even when they denote the same instant (`49.484` vs
/// `49.4840000001`); canonicalization collapses such variants to one
/// filename so the held-back allow-list, itself built from filenames,
/// matches correctly.
///
/// # Arguments
/// * `segment_id` - The corpus-assigned segment identifier.
///
/// # Returns
/// * `Result<String, CorpusError>` - The canonical `.wav` filename, or
///   `MalformedId` if the id does not match `<talk>-<start>-<end>`.
pub fn canonical_filename(segment_id: &str) -> Result<String, CorpusError> {
    let timings = SEGMENT_ID_RE
        .captures(segment_id)
        .ok_or_else(|| CorpusError::MalformedId(segment_id.to_string()))?;

    let talk = &timings["talk"];
    let start = format_time(&timings["start"])?;
    let end = format_time(&timings["end"])?;

    Ok(format!("{talk}-{start:0>6}-{end:0>6}.wav"))
}

/// Renders a decimal time-in-seconds string as a fixed-width digit string.
///
/// Works on the decimal digits directly so there is no binary-float
/// representation drift. The value is truncated to eight fractional places
/// and re-rendered with exactly six, which reduces to keeping the first six
/// fractional digits; truncation never carries upward, so a value just
/// below a boundary stays in its bucket. `"49.484"` becomes `"49484000"`.
pub fn format_time(time_str: &str) -> Result<String, CorpusError> {
    let (whole, frac) = match time_str.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (time_str, ""),
    };

    let all_digits =
        |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !(frac.is_empty() || all_digits(frac)) {
        return Err(CorpusError::MalformedId(time_str.to_string()));
    }

    let kept = &frac[..frac.len().min(6)];
    Ok(format!("{whole}{kept:0<6}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_filename_matches_tedlium_convention() {
        let name = canonical_filename("DavidRockwell_2002-49.484-50.449").unwrap();
        assert_eq!(name, "DavidRockwell_2002-49484000-50449000.wav");
    }

    #[test]
    fn canonical_filename_is_deterministic() {
        let id = "AlGore_2009-123.456789123-124.0";
        let first = canonical_filename(id).unwrap();
        let second = canonical_filename(id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn talk_names_may_contain_digits_underscores_and_dots() {
        let name = canonical_filename("Talk_1.2-5.5-6.0").unwrap();
        assert_eq!(name, "Talk_1.2-5500000-6000000.wav");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(
            canonical_filename("not-an-id"),
            Err(CorpusError::MalformedId(_))
        ));
        assert!(matches!(
            canonical_filename("Talk1-abc-5.0"),
            Err(CorpusError::MalformedId(_))
        ));
        assert!(matches!(
            canonical_filename("missing_timings"),
            Err(CorpusError::MalformedId(_))
        ));
    }

    #[test]
    fn format_time_truncates_identical_prefixes_to_one_bucket() {
        // Same value up to the truncation cut, extra digits beyond it.
        assert_eq!(
            format_time("49.4844999912").unwrap(),
            format_time("49.484499").unwrap()
        );
    }

    #[test]
    fn format_time_never_rounds_up_across_a_boundary() {
        // 49.4844999 rounds to ...4500 at six places; truncation must not.
        assert_eq!(format_time("49.4844999").unwrap(), "49484499");
        assert_eq!(format_time("49.4845").unwrap(), "49484500");
        assert_ne!(
            format_time("49.48449999").unwrap(),
            format_time("49.48450001").unwrap()
        );
    }

    #[test]
    fn format_time_pads_short_fractions_with_zeros() {
        assert_eq!(format_time("49.484").unwrap(), "49484000");
        assert_eq!(format_time("5").unwrap(), "5000000");
        assert_eq!(format_time("0.5").unwrap(), "0500000");
    }

    #[test]
    fn format_time_rejects_non_decimal_input() {
        assert!(format_time("abc").is_err());
        assert!(format_time("4.9.4").is_err());
        assert!(format_time("").is_err());
        assert!(format_time(".5").is_err());
    }
}
