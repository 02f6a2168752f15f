//! Reads the tool catalog (`toolsData` in the site's `tools.ts`).

use crate::domain::model::Tool;
use crate::utils::error::{Result, ToolError};
use regex::Regex;
use std::collections::BTreeMap;

const TOOLS_ARRAY_PATTERN: &str = r"(?s)const toolsData = \[(.*?)\];";
const TOOL_ENTRY_PATTERN: &str = r#"(?s)\{\s*id:\s*['"]([^'"]+)['"],\s*name:\s*['"]([^'"]+)['"],\s*description:\s*['"]([^'"]*)['"],\s*category:\s*['"]([^'"]+)['"].*?href:\s*['"]([^'"]+)['"]"#;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ToolError::ProcessingError {
        message: format!("invalid catalog pattern: {}", e),
    })
}

/// Every tool page lives under `/tools/`; anything else is rebuilt from the id.
pub fn normalize_href(id: &str, href: &str) -> String {
    let href = if href.starts_with("/tools/") {
        href.to_string()
    } else {
        format!("/tools/{}", id)
    };
    href.to_lowercase()
        .replace("//", "/")
        .trim_end_matches('/')
        .to_string()
}

pub fn parse_tools(source: &str, base_url: &str) -> Result<Vec<Tool>> {
    let base_url = base_url.trim_end_matches('/');
    let array_re = compile(TOOLS_ARRAY_PATTERN)?;
    let entry_re = compile(TOOL_ENTRY_PATTERN)?;

    let array = array_re
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ToolError::ProcessingError {
            message: "Could not find toolsData array in the catalog source".to_string(),
        })?;

    let tools: Vec<Tool> = entry_re
        .captures_iter(array.as_str())
        .map(|caps| {
            let id = caps[1].to_string();
            let href = normalize_href(&id, &caps[5]);
            Tool {
                url: format!("{}{}", base_url, href),
                name: caps[2].to_string(),
                description: caps[3].to_string(),
                category: caps[4].to_string(),
                href,
                id,
            }
        })
        .collect();

    tracing::info!("Parsed {} tools from catalog", tools.len());
    Ok(tools)
}

/// Categories in name order, tools sorted by name inside each one.
pub fn group_by_category(tools: Vec<Tool>) -> BTreeMap<String, Vec<Tool>> {
    let mut grouped: BTreeMap<String, Vec<Tool>> = BTreeMap::new();
    for tool in tools {
        grouped.entry(tool.category.clone()).or_default().push(tool);
    }
    for tools in grouped.values_mut() {
        tools.sort_by(|a, b| a.name.cmp(&b.name));
    }
    grouped
}
