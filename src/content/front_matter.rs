use serde_json::{Map, Value};

use crate::util::toml_value::table_to_json;

/// Structured metadata from the top of a content file.
pub type FrontMatter = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delimiter {
    /// `---` fenced YAML
    Yaml,
    /// `+++` fenced TOML
    Toml,
}

impl Delimiter {
    fn from_line(line: &str) -> Option<Delimiter> {
        match line.trim_end() {
            "---" => Some(Delimiter::Yaml),
            "+++" => Some(Delimiter::Toml),
            _ => None,
        }
    }

    fn fence(&self) -> &'static str {
        match self {
            Delimiter::Yaml => "---",
            Delimiter::Toml => "+++",
        }
    }
}

/// Splits `raw` into its front matter and body.
///
/// The front matter block must start on the first line. A file without an
/// opening fence has no front matter and its whole text is the body.
pub fn split_front_matter(raw: &str) -> Result<(FrontMatter, &str), String> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((FrontMatter::new(), raw));
    };
    let Some(delimiter) = Delimiter::from_line(first) else {
        return Ok((FrontMatter::new(), raw));
    };

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == delimiter.fence() {
            let block = &raw[block_start..offset];
            let body = &raw[offset + line.len()..];
            let front_matter = parse_block(delimiter, block)?;
            return Ok((front_matter, body));
        }
        offset += line.len();
    }

    Err(format!("Missing closing `{}` for the front matter", delimiter.fence()))
}

fn parse_block(delimiter: Delimiter, block: &str) -> Result<FrontMatter, String> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::new());
    }

    match delimiter {
        Delimiter::Yaml => {
            let value: Value = serde_yaml_ng::from_str(block)
                .map_err(|e| format!("Error parsing YAML front matter: {}", e))?;
            match value {
                Value::Object(map) => Ok(map),
                Value::Null => Ok(FrontMatter::new()),
                _ => Err("Front matter must be a key/value mapping".to_string()),
            }
        }
        Delimiter::Toml => {
            let table: toml::Table = block.parse()
                .map_err(|e| format!("Error parsing TOML front matter: {}", e))?;
            Ok(table_to_json(table))
        }
    }
}
