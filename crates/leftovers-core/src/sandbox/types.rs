use serde::Deserialize;

/// Top-level manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SandboxManifest {
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

/// One `[[resources]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSpec {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    /// Names of resources that must be deleted before this one can be.
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// When set, every delete of this resource fails with this message.
    #[serde(default)]
    pub fail: Option<String>,
}
