//! JSON writer for semantic objects

use crate::error::Result;
use crate::semantic::SemanticObject;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes semantic objects as a JSON array
///
/// Field order is fixed by the record types, so identical builds produce
/// identical bytes.
pub struct JsonWriter<'a> {
    objects: &'a [SemanticObject],
    /// Indent the output
    pub pretty: bool,
}

impl<'a> JsonWriter<'a> {
    /// Create a writer for compact output
    pub fn new(objects: &'a [SemanticObject]) -> Self {
        Self {
            objects,
            pretty: false,
        }
    }

    /// Create a writer for indented output
    pub fn new_pretty(objects: &'a [SemanticObject]) -> Self {
        Self {
            objects,
            pretty: true,
        }
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, self.objects)?;
        } else {
            serde_json::to_writer(&mut writer, self.objects)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to a string
    pub fn to_json_string(&self) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(self.objects)?
        } else {
            serde_json::to_string(self.objects)?
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityType, Insert};
    use crate::rules::{RuleMatch, SemanticKind};
    use crate::semantic::basic_object;
    use crate::types::Vector2;

    fn objects() -> Vec<SemanticObject> {
        let entity = EntityType::from(Insert::new("DOOR", Vector2::new(1.0, 2.0))).on_layer("A-DOOR");
        vec![basic_object(
            &entity,
            RuleMatch {
                kind: SemanticKind::Door,
                provenance: "layer:A-DOOR".to_string(),
            },
        )]
    }

    #[test]
    fn test_compact_output_is_an_array() {
        let objects = objects();
        let text = JsonWriter::new(&objects).to_json_string().unwrap();
        assert!(text.starts_with(r#"[{"kind":"door","confidence":null,"source_rule":"layer:A-DOOR","geom_wkt":"POINT(1 2)""#));
        assert!(text.ends_with("}]"));
    }

    #[test]
    fn test_write_to_file() {
        let objects = objects();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        JsonWriter::new_pretty(&objects).write_to_file(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
        assert_eq!(parsed[0]["properties"]["type"], "INSERT");
    }
}
