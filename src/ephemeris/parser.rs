use std::io::BufRead;

use crate::{
    constants::{JulianDay, Radian, COMMENT_MARKER, DPI},
    skytrack_errors::SkyTrackError,
};

/// One data line of the ephemeris generator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisRecord {
    pub jd: JulianDay,
    pub ra: Radian,
    pub dec: Radian,
}

/// Parse the text output of an ephemeris generator.
///
/// Each data line holds `<julian_day> <ra_radians> <dec_radians>`; extra trailing columns are
/// ignored. Blank lines and lines whose first non-blank character is `#` are skipped. The right
/// ascension is wrapped into `[0, 2π)`.
///
/// Arguments
/// ---------
/// * `reader`: the generator output
/// * `tool`: the generator name, used in error messages
///
/// Return
/// ------
/// * the accepted records in output order, or [`SkyTrackError::MalformedEphemerisLine`] for the
///   first data line that does not hold three numbers
pub fn parse_ephemeris_output<R: BufRead>(
    reader: R,
    tool: &str,
) -> Result<Vec<EphemerisRecord>, SkyTrackError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim_start();
        if content.is_empty() || content.starts_with(COMMENT_MARKER) {
            continue;
        }

        let record = parse_record(content).ok_or_else(|| SkyTrackError::MalformedEphemerisLine {
            tool: tool.to_string(),
            line_number: index + 1,
            line: line.clone(),
        })?;
        records.push(record);
    }

    Ok(records)
}

fn parse_record(line: &str) -> Option<EphemerisRecord> {
    let mut columns = line
        .split_whitespace()
        .map(|column| column.parse::<f64>().ok().filter(|value| value.is_finite()));

    let jd = columns.next()??;
    let ra = columns.next()??;
    let dec = columns.next()??;

    Some(EphemerisRecord {
        jd,
        ra: ra.rem_euclid(DPI),
        dec,
    })
}

#[cfg(test)]
mod parser_test {
    use super::*;

    #[test]
    fn test_parse_output() {
        let output = "\
# ephemerisCompute output
#   jd          ra        dec

2459000.5 1.25 0.31
  2459001.0 1.26 0.32 extra
\t
2459001.5 -0.5 -0.1
";
        let records = parse_ephemeris_output(output.as_bytes(), "ephemerisCompute").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            EphemerisRecord {
                jd: 2459000.5,
                ra: 1.25,
                dec: 0.31
            }
        );
        assert_eq!(records[1].jd, 2459001.0);
        assert_eq!(records[2].ra, DPI - 0.5);
        assert_eq!(records[2].dec, -0.1);
    }

    #[test]
    fn test_parse_malformed_line() {
        let output = "# header\n2459000.5 1.25 0.31\n2459001.0 nan?? 0.32\n";
        assert_eq!(
            parse_ephemeris_output(output.as_bytes(), "ephemerisCompute"),
            Err(SkyTrackError::MalformedEphemerisLine {
                tool: "ephemerisCompute".into(),
                line_number: 3,
                line: "2459001.0 nan?? 0.32".into()
            })
        );

        let output = "2459000.5 1.25\n";
        assert!(parse_ephemeris_output(output.as_bytes(), "ephemerisCompute").is_err());
    }

    #[test]
    fn test_parse_only_comments() {
        let output = "# nothing to see\n\n   # still nothing\n";
        let records = parse_ephemeris_output(output.as_bytes(), "ephemerisCompute").unwrap();
        assert!(records.is_empty());
    }
}
