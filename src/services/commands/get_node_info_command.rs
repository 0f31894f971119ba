use crate::services::commands::traits::node_command_trait::NodeCommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetNodeInfoCommand {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub app_name: String,
    pub app_version: String,
    pub latest_milestone: String,
    pub latest_milestone_index: u64,
    #[serde(default)]
    pub latest_solid_subtangle_milestone: Option<String>,
    #[serde(default)]
    pub latest_solid_subtangle_milestone_index: Option<u64>,
    #[serde(default)]
    pub neighbors: Option<u32>,
    #[serde(default)]
    pub tips: Option<u32>,
}

impl NodeCommand for GetNodeInfoCommand {
    const NAME: &'static str = "getNodeInfo";
    type Payload = NodeInfo;
}
