use std::path::Path;

use ini::Ini;
use rax_core::error::RaxError;

const CREDENTIALS_SECTION: &str = "rackspace_cloud";

/// Credentials read from a pyrax-style INI file.
///
/// Every field is optional at parse time; a file with missing keys still
/// loads. Required keys are enforced later, when the provider is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInfo {
    pub identity_type: Option<String>,
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub region: Option<String>,
}

/// Read the `[rackspace_cloud]` section of the INI file at `path`.
///
/// Only an unreadable or unparseable file is an error; a missing section or
/// missing keys yield `None` fields.
pub fn load(path: &Path) -> Result<LoginInfo, RaxError> {
    let file = Ini::load_from_file(path).map_err(|e| RaxError::Credentials {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(section) = file.section(Some(CREDENTIALS_SECTION)) else {
        return Ok(LoginInfo::default());
    };

    Ok(LoginInfo {
        identity_type: section.get("identity_type").map(str::to_string),
        username: section.get("username").map(str::to_string),
        api_key: section.get("api_key").map(str::to_string),
        region: section.get("region").map(str::to_string),
    })
}
