use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs::read_to_string;

const PROPERTIES_PATH: [&str; 2] = ["project", "properties"];

fn in_properties(stack: &[String]) -> bool {
    stack.len() >= PROPERTIES_PATH.len()
        && stack.iter().zip(PROPERTIES_PATH).all(|(name, expected)| name == expected)
}

fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse::<u32>().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

/// Collect the direct children of `<project><properties>` from pom content.
///
/// Values are trimmed; properties declared inside profiles are ignored.
///
/// # Errors
/// Returns error if the content is not well-formed XML.
pub fn parse_pom_properties(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut properties = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                stack.push(name);
                if stack.len() == PROPERTIES_PATH.len() + 1 && in_properties(&stack) {
                    current = Some(String::new());
                }
            }
            Ok(Event::Empty(e)) => {
                if stack.len() == PROPERTIES_PATH.len() && in_properties(&stack) {
                    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                    properties.insert(name, String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if stack.len() == PROPERTIES_PATH.len() + 1
                    && let Some(value) = current.as_mut()
                {
                    value.push_str(std::str::from_utf8(&e)?);
                }
            }
            Ok(Event::CData(e)) => {
                if stack.len() == PROPERTIES_PATH.len() + 1
                    && let Some(value) = current.as_mut()
                {
                    value.push_str(std::str::from_utf8(&e)?);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if stack.len() == PROPERTIES_PATH.len() + 1
                    && let Some(value) = current.as_mut()
                {
                    let name = e.decode()?;
                    if let Some(resolved) = resolve_reference(&name) {
                        value.push_str(&resolved);
                    }
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() == PROPERTIES_PATH.len() + 1
                    && in_properties(&stack)
                    && let Some(value) = current.take()
                    && let Some(name) = stack.last()
                {
                    properties.insert(name.clone(), value.trim().to_string());
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(anyhow::anyhow!("XML parsing error: {e}")),
        }
        buf.clear();
    }

    Ok(properties)
}

/// Read the `<properties>` of the pom at `path`
///
/// # Errors
/// Returns error if the file cannot be read or is not well-formed XML.
pub async fn read_pom_properties(path: &Path) -> Result<HashMap<String, String>> {
    let content = read_to_string(path)
        .await
        .with_context(|| format!("Failed to read pom - {}", path.display()))?;
    parse_pom_properties(&content).with_context(|| format!("Failed to parse pom - {}", path.display()))
}
