use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug visualization toggles.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
pub struct DebugOptions {
    /// Visualize surface normals as RGB colors.
    #[schemars(title = "Show Normals")]
    pub show_normals: bool,
    /// Trace-log normalized pointer coordinates on every move.
    #[schemars(title = "Log Pointer")]
    pub log_pointer: bool,
}
