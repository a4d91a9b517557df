//! Shader source text as loaded from an asset
//!
//! A source file starts with a stage tag line (`//vertex` or `//fragment`).
//! An optional `//entry <name>` line among the leading comment lines
//! overrides the entry point.

use crate::error::{Error, Result};
use crate::graphics_device::ShaderStage;

/// Entry point used when the source does not name one
pub const DEFAULT_ENTRY_POINT: &str = "main";

const VERTEX_TAG: &str = "//vertex";
const FRAGMENT_TAG: &str = "//fragment";
const ENTRY_TAG: &str = "//entry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Asset name (file name without directory or extension)
    pub name: String,
    pub stage: ShaderStage,
    pub entry_point: String,
    /// Full text, header lines included
    pub content: String,
}

impl ShaderSource {
    pub fn new(name: &str, stage: ShaderStage, content: &str) -> Self {
        Self {
            name: name.to_string(),
            stage,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            content: content.to_string(),
        }
    }

    /// Read the header of `text` and build the source for asset `name`
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` when the first non-blank line is not a stage tag.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim).skip_while(|line| line.is_empty());

        let stage = match lines.next() {
            Some(VERTEX_TAG) => ShaderStage::Vertex,
            Some(FRAGMENT_TAG) => ShaderStage::Fragment,
            other => {
                return Err(Error::InvalidResource(format!(
                    "Shader '{}' must start with '{}' or '{}', found {:?}",
                    name, VERTEX_TAG, FRAGMENT_TAG, other.unwrap_or("end of file")
                )));
            }
        };

        let entry_point = lines
            .take_while(|line| line.starts_with("//"))
            .find_map(|line| line.strip_prefix(ENTRY_TAG))
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .unwrap_or(DEFAULT_ENTRY_POINT);

        Ok(Self {
            name: name.to_string(),
            stage,
            entry_point: entry_point.to_string(),
            content: text.to_string(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}
