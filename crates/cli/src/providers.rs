use log::debug;
use rax_core::error::RaxError;
use rax_core::NodeProvider;
use rax_rackspace::Rackspace;

use crate::creds::LoginInfo;

/// Build the provider driver from loaded credentials.
///
/// The region always comes from the CLI `env` argument; a differing `region`
/// key in the credentials file is ignored.
pub fn create_provider(creds: &LoginInfo, region: &str) -> Result<Box<dyn NodeProvider>, RaxError> {
    let username = creds.username.as_deref().ok_or_else(|| {
        RaxError::Validation(
            "username is required, set it in your credentials file".to_string(),
        )
    })?;
    let api_key = creds.api_key.as_deref().ok_or_else(|| {
        RaxError::Validation(
            "api_key is required, set it in your credentials file".to_string(),
        )
    })?;

    if let Some(file_region) = creds.region.as_deref() {
        if !file_region.eq_ignore_ascii_case(region) {
            debug!(
                "credentials file names region '{}', using '{}' from the command line",
                file_region, region
            );
        }
    }

    Ok(Box::new(Rackspace::connect(username, api_key, region)?))
}
