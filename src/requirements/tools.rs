//! The tools toolstrap manages and how to query their versions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tool toolstrap can detect and install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Node,
    Curl,
    Wget,
}

impl Tool {
    /// Every tool, in the order they are checked by default.
    pub const ALL: [Tool; 3] = [Tool::Node, Tool::Curl, Tool::Wget];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Node => "node",
            Tool::Curl => "curl",
            Tool::Wget => "wget",
        }
    }

    /// The version query that decides whether this tool is present.
    pub fn check(&self) -> ToolCheck {
        match self {
            Tool::Node => ToolCheck::new("node", &["-v"]),
            Tool::Curl => ToolCheck::new("curl", &["-V"]),
            Tool::Wget => ToolCheck::new("wget", &["-V"]),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A program plus the arguments that make it print its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCheck {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl ToolCheck {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    /// The check as it would be typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_flags_match_each_tool() {
        assert_eq!(Tool::Node.check().command_line(), "node -v");
        assert_eq!(Tool::Curl.check().command_line(), "curl -V");
        assert_eq!(Tool::Wget.check().command_line(), "wget -V");
    }

    #[test]
    fn all_tools_in_default_order() {
        let names: Vec<_> = Tool::ALL.iter().map(Tool::name).collect();
        assert_eq!(names, vec!["node", "curl", "wget"]);
    }

    #[test]
    fn tool_names_round_trip_through_serde() {
        let tool: Tool = serde_yaml::from_str("wget").unwrap();
        assert_eq!(tool, Tool::Wget);
        assert_eq!(serde_json::to_string(&Tool::Node).unwrap(), "\"node\"");
    }
}
