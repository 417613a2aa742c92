//! Build metadata as published by the cloud build server.
//!
//! The server record nests the interesting bits under `Request` (what was
//! asked for) and `Config` (what the target resolved to). Only the fields the
//! analysis needs are read; everything else is ignored. Any field may be
//! missing or `null`.

use serde::Deserialize;

use crate::core::DumpDoctorError;
use crate::parser::schema::BuildMetadata;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct BuildRecord {
    request: Option<BuildRequest>,
    config: Option<BuildConfig>,
    release: Option<String>,
    target: Option<String>,
    manufacturer: Option<String>,
    #[serde(rename = "MCU")]
    mcu: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct BuildRequest {
    options: Option<Vec<String>>,
    release: Option<String>,
    target: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct BuildConfig {
    #[serde(rename = "MCU")]
    mcu: Option<String>,
    target: Option<String>,
    manufacturer: Option<String>,
}

pub(crate) fn parse_build_record(json: &str) -> Result<BuildMetadata, serde_json::Error> {
    let record: BuildRecord = serde_json::from_str(json).inspect_err(|e| {
        tracing::warn!("Unreadable build metadata: {}", e);
    })?;
    Ok(record.into())
}

impl BuildMetadata {
    /// Read build metadata from the build server's JSON record.
    pub fn from_json(json: &str) -> Result<Self, DumpDoctorError> {
        Ok(parse_build_record(json)?)
    }
}

impl From<BuildRecord> for BuildMetadata {
    fn from(r: BuildRecord) -> Self {
        let request = r.request.unwrap_or_default();
        let config = r.config.unwrap_or_default();
        BuildMetadata {
            manufacturer: config.manufacturer.or(r.manufacturer),
            target: request.target.or(config.target).or(r.target),
            mcu: config.mcu.or(r.mcu),
            release: request.release.or(r.release),
            options: request.options.unwrap_or_default().into_iter().collect(),
        }
    }
}
