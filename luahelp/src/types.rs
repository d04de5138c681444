use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuaHelp {
    pub events: Vec<LuaHelpEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuaHelpEvent {
    pub name:        String,
    /// Argument names as written in the signature line.
    #[serde(default)]
    pub arguments:   Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub parameters:  Vec<LuaHelpEventParameter>,
    #[serde(default)]
    pub line:        usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuaHelpEventParameter {
    pub name:        String,
    /// Coarse type tag (`String`, `Int`, `Table`, ...), not validated here.
    #[serde(rename = "type")]
    pub type_:       String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub additional_descriptions: Vec<String>,
}
