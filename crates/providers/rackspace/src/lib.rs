use std::time::Duration;

use log::debug;
use rax_core::error::RaxError;
use rax_core::{Node, NodeProvider, NodeState};
use serde::{Deserialize, Serialize};

const IDENTITY_URL: &str = "https://identity.api.rackspacecloud.com/v2.0/tokens";
const COMPUTE_SERVICE: &str = "cloudServersOpenStack";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver for the Rackspace public cloud compute API.
///
/// `connect` authenticates eagerly against the identity endpoint and resolves
/// the region's compute endpoint from the service catalog, so bad credentials
/// or an unknown region surface at construction time rather than on the first
/// node operation.
pub struct Rackspace {
    client: reqwest::blocking::Client,
    token: String,
    endpoint: String,
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    auth: AuthPayload<'a>,
}

#[derive(Serialize)]
struct AuthPayload<'a> {
    #[serde(rename = "RAX-KSKEY:apiKeyCredentials")]
    credentials: ApiKeyCredentials<'a>,
}

#[derive(Serialize)]
struct ApiKeyCredentials<'a> {
    username: &'a str,
    #[serde(rename = "apiKey")]
    api_key: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    access: Access,
}

#[derive(Deserialize)]
struct Access {
    token: Token,
    #[serde(rename = "serviceCatalog")]
    service_catalog: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct Token {
    id: String,
}

#[derive(Deserialize)]
struct CatalogEntry {
    name: String,
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Deserialize)]
struct CatalogEndpoint {
    region: Option<String>,
    #[serde(rename = "publicURL")]
    public_url: String,
}

#[derive(Deserialize)]
struct ServerList {
    servers: Vec<ServerDetail>,
}

#[derive(Deserialize)]
struct ServerDetail {
    id: String,
    name: String,
    status: String,
}

#[derive(Serialize)]
struct StopAction {
    #[serde(rename = "os-stop")]
    os_stop: Option<()>,
}

impl Rackspace {
    pub fn connect(username: &str, api_key: &str, region: &str) -> Result<Self, RaxError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RaxError::Transport(format!("failed to build HTTP client: {}", e)))?;

        let payload = AuthRequest {
            auth: AuthPayload {
                credentials: ApiKeyCredentials { username, api_key },
            },
        };

        let response = client
            .post(IDENTITY_URL)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| RaxError::Transport(format!("identity request failed: {}", e)))?;
        let response = check_status(response)?;

        let auth: AuthResponse = response
            .json()
            .map_err(|e| RaxError::Transport(format!("failed to parse identity response: {}", e)))?;

        let endpoint = compute_endpoint(&auth.access.service_catalog, region)?;
        debug!("resolved compute endpoint for region {}: {}", region, endpoint);

        Ok(Rackspace {
            client,
            token: auth.access.token.id,
            endpoint,
        })
    }
}

impl NodeProvider for Rackspace {
    fn list_nodes(&self) -> Result<Vec<Node>, RaxError> {
        let url = format!("{}/servers/detail", self.endpoint);

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", &self.token)
            .header("accept", "application/json")
            .send()
            .map_err(|e| RaxError::Transport(format!("server listing failed: {}", e)))?;
        let response = check_status(response)?;

        let list: ServerList = response
            .json()
            .map_err(|e| RaxError::Transport(format!("failed to parse server listing: {}", e)))?;

        Ok(list
            .servers
            .into_iter()
            .map(|server| Node {
                state: node_state(&server.status),
                id: server.id,
                name: server.name,
            })
            .collect())
    }

    fn stop_node(&self, node: &Node) -> Result<(), RaxError> {
        let url = format!("{}/servers/{}/action", self.endpoint, node.id);

        let response = self
            .client
            .post(&url)
            .header("X-Auth-Token", &self.token)
            .json(&StopAction { os_stop: None })
            .send()
            .map_err(|e| RaxError::Transport(format!("stop request failed: {}", e)))?;
        check_status(response)?;

        Ok(())
    }

    fn destroy_node(&self, node: &Node) -> Result<(), RaxError> {
        let url = format!("{}/servers/{}", self.endpoint, node.id);

        let response = self
            .client
            .delete(&url)
            .header("X-Auth-Token", &self.token)
            .send()
            .map_err(|e| RaxError::Transport(format!("destroy request failed: {}", e)))?;
        check_status(response)?;

        Ok(())
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, RaxError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        let message = response.text().unwrap_or_default();
        Err(RaxError::Api { status, message })
    }
}

/// Pick the compute endpoint for a region out of the identity service catalog.
fn compute_endpoint(catalog: &[CatalogEntry], region: &str) -> Result<String, RaxError> {
    catalog
        .iter()
        .filter(|entry| entry.name == COMPUTE_SERVICE)
        .flat_map(|entry| entry.endpoints.iter())
        .find(|endpoint| {
            endpoint
                .region
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(region))
        })
        .map(|endpoint| endpoint.public_url.trim_end_matches('/').to_string())
        .ok_or_else(|| {
            RaxError::Validation(format!(
                "no {} endpoint found for region '{}'",
                COMPUTE_SERVICE, region
            ))
        })
}

/// Map compute API status strings onto the states the CLI styles.
fn node_state(status: &str) -> NodeState {
    match status.to_ascii_uppercase().as_str() {
        "ACTIVE" => NodeState::Running,
        "SHUTOFF" | "STOPPED" => NodeState::Stopped,
        _ => NodeState::Other(status.to_ascii_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_maps_to_running() {
        assert_eq!(node_state("ACTIVE"), NodeState::Running);
    }

    #[test]
    fn shutoff_and_stopped_map_to_stopped() {
        assert_eq!(node_state("SHUTOFF"), NodeState::Stopped);
        assert_eq!(node_state("STOPPED"), NodeState::Stopped);
    }

    #[test]
    fn unknown_statuses_carry_through_lowercased() {
        assert_eq!(
            node_state("REBOOT"),
            NodeState::Other("reboot".to_string())
        );
    }

    #[test]
    fn endpoint_is_selected_by_service_name_and_region() {
        let auth: AuthResponse = serde_json::from_str(
            r#"{
                "access": {
                    "token": {"id": "tok-123"},
                    "serviceCatalog": [
                        {
                            "name": "cloudFiles",
                            "endpoints": [{"region": "DFW", "publicURL": "https://files.example/v1"}]
                        },
                        {
                            "name": "cloudServersOpenStack",
                            "endpoints": [
                                {"region": "ORD", "publicURL": "https://ord.example/v2/123"},
                                {"region": "DFW", "publicURL": "https://dfw.example/v2/123/"}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        let endpoint = compute_endpoint(&auth.access.service_catalog, "dfw").unwrap();
        assert_eq!(endpoint, "https://dfw.example/v2/123");
    }

    #[test]
    fn missing_region_is_a_validation_error() {
        let catalog = vec![CatalogEntry {
            name: COMPUTE_SERVICE.to_string(),
            endpoints: vec![CatalogEndpoint {
                region: Some("ORD".to_string()),
                public_url: "https://ord.example/v2/123".to_string(),
            }],
        }];

        let err = compute_endpoint(&catalog, "syd").unwrap_err();
        assert!(matches!(err, RaxError::Validation(_)));
    }
}
