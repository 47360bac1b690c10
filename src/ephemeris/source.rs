//! # Ephemeris sources
//!
//! An [`EphemerisSource`] answers one [`TrackDefinition`] with the list of sky positions of the
//! object over the requested time range. Two sources are provided:
//!
//! * [`EphemerisCompute`] – runs the external `ephemerisCompute` tool and reads its standard
//!   output. The call blocks until the tool closes its output; there is no timeout.
//! * [`StaticEphemeris`] – serves canned generator output from memory, keyed by object id.
//!
//! ## Process contract
//!
//! ```text
//! <tool> --jd_min <f> --jd_max <f> --jd_step 0.5 --output_format 1
//!        --output_constellations 0 --output_binary 0 --objects <object_id>
//! ```
//!
//! The arguments are handed to the process directly, no shell is involved. The tool has no error
//! channel: an exit status other than success is logged, and an output without any data line is
//! reported by the loader as [`SkyTrackError::EmptyEphemeris`].

use std::{
    collections::HashMap,
    io::BufReader,
    process::{Command, Stdio},
};

use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use log::{debug, warn};

use crate::{
    ephemeris::{
        parser::{parse_ephemeris_output, EphemerisRecord},
        TrackDefinition,
    },
    skytrack_errors::SkyTrackError,
};

pub trait EphemerisSource {
    /// Name of the source, used in diagnostics
    fn name(&self) -> &str;

    /// Compute the positions of `definition.object_id` from `jd_start` to `jd_end`.
    ///
    /// Return
    /// ------
    /// * the accepted records in time order; an empty list is a valid answer at this level
    fn query(&self, definition: &TrackDefinition) -> Result<Vec<EphemerisRecord>, SkyTrackError>;
}

/// The external `ephemerisCompute` process
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisCompute {
    path: Utf8PathBuf,
}

impl EphemerisCompute {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        EphemerisCompute { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Command line arguments for one track definition
    pub fn command_args(definition: &TrackDefinition) -> Vec<String> {
        vec![
            "--jd_min".into(),
            format!("{:.15}", definition.jd_start),
            "--jd_max".into(),
            format!("{:.15}", definition.jd_end),
            "--jd_step".into(),
            format!("{}", definition.jd_step),
            "--output_format".into(),
            "1".into(),
            "--output_constellations".into(),
            "0".into(),
            "--output_binary".into(),
            "0".into(),
            "--objects".into(),
            definition.object_id.clone(),
        ]
    }
}

impl EphemerisSource for EphemerisCompute {
    fn name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }

    fn query(&self, definition: &TrackDefinition) -> Result<Vec<EphemerisRecord>, SkyTrackError> {
        let args = Self::command_args(definition);
        debug!("Running {} {}", self.path, args.iter().join(" "));

        let mut child = Command::new(self.path.as_std_path())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| SkyTrackError::GeneratorLaunch {
                tool: self.path.to_string(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            child.kill()?;
            child.wait()?;
            return Err(SkyTrackError::IoError(std::io::Error::other(format!(
                "standard output of {} was not captured",
                self.path
            ))));
        };

        let records = match parse_ephemeris_output(BufReader::new(stdout), self.name()) {
            Ok(records) => records,
            Err(err) => {
                // the tool may still be writing, it must not outlive the run
                let _ = child.kill();
                let _ = child.wait();
                return Err(err);
            }
        };

        let status = child.wait()?;
        if !status.success() {
            warn!(
                "{} exited with {status} for {}",
                self.name(),
                definition.object_id
            );
        }

        Ok(records)
    }
}

/// Canned generator output, served from memory.
///
/// Objects without an entry answer with an empty output.
#[derive(Debug, Clone, Default)]
pub struct StaticEphemeris {
    outputs: HashMap<String, String>,
}

impl StaticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw generator output returned for `object_id`
    pub fn with_output(mut self, object_id: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(object_id.into(), output.into());
        self
    }
}

impl EphemerisSource for StaticEphemeris {
    fn name(&self) -> &str {
        "static"
    }

    fn query(&self, definition: &TrackDefinition) -> Result<Vec<EphemerisRecord>, SkyTrackError> {
        match self.outputs.get(&definition.object_id) {
            Some(output) => parse_ephemeris_output(output.as_bytes(), self.name()),
            None => Ok(Vec::new()),
        }
    }
}
