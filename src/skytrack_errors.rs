use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyTrackError {
    #[error("Invalid ephemeris definition (expected \"<object_id>,<jd_min>,<jd_max>\"): {0}")]
    InvalidTrackDefinition(String),

    #[error("Invalid time range for {object_id}: jd_min {jd_min} is after jd_max {jd_max}")]
    InvalidTimeRange {
        object_id: String,
        jd_min: f64,
        jd_max: f64,
    },

    #[error("Unable to launch ephemeris generator {tool}: {source}")]
    GeneratorLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} returned no data for {object_id}")]
    EmptyEphemeris { tool: String, object_id: String },

    #[error("{tool} produced a malformed line {line_number}: {line:?}")]
    MalformedEphemerisLine {
        tool: String,
        line_number: usize,
        line: String,
    },

    #[error("Invalid coverage grid resolution: {ra_bins} RA bins x {dec_bins} Dec bins")]
    InvalidGridResolution { ra_bins: usize, dec_bins: usize },

    #[error("Unable to perform I/O operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SkyTrackError {
    fn eq(&self, other: &Self) -> bool {
        use SkyTrackError::*;
        match (self, other) {
            (InvalidTrackDefinition(a), InvalidTrackDefinition(b)) => a == b,
            (
                InvalidTimeRange {
                    object_id: a,
                    jd_min: a_min,
                    jd_max: a_max,
                },
                InvalidTimeRange {
                    object_id: b,
                    jd_min: b_min,
                    jd_max: b_max,
                },
            ) => a == b && a_min == b_min && a_max == b_max,
            (
                EmptyEphemeris {
                    tool: a,
                    object_id: a_id,
                },
                EmptyEphemeris {
                    tool: b,
                    object_id: b_id,
                },
            ) => a == b && a_id == b_id,
            (
                MalformedEphemerisLine {
                    tool: a,
                    line_number: a_n,
                    line: a_line,
                },
                MalformedEphemerisLine {
                    tool: b,
                    line_number: b_n,
                    line: b_line,
                },
            ) => a == b && a_n == b_n && a_line == b_line,
            (
                InvalidGridResolution {
                    ra_bins: a_ra,
                    dec_bins: a_dec,
                },
                InvalidGridResolution {
                    ra_bins: b_ra,
                    dec_bins: b_dec,
                },
            ) => a_ra == b_ra && a_dec == b_dec,

            // io errors are not comparable: equal when the variant matches
            (GeneratorLaunch { tool: a, .. }, GeneratorLaunch { tool: b, .. }) => a == b,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
