use tracing::debug;

use crate::document;
use crate::error::CoreResult;
use crate::location::Location;
use crate::resolver::ReferenceResolver;
use crate::resource::Resource;

/// An API definition to prepare for upload.
///
/// Preparation reads the document and, when requested, imports its external
/// references. The raw bytes pass through untouched whenever nothing was
/// imported, so servers see exactly what the user wrote.
#[derive(Debug)]
pub struct Definition {
    source: Location,
    import_external_references: bool,
    resource: Resource,
}

impl Definition {
    pub fn new(source: Location, import_external_references: bool) -> Self {
        Self {
            source,
            import_external_references,
            resource: Resource::new(),
        }
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    /// Produce the definition text to upload.
    pub async fn prepare(&self) -> CoreResult<String> {
        let raw = self.resource.read(&self.source).await?;
        if !self.import_external_references {
            return Ok(raw);
        }

        let (tree, format) = document::parse(&raw)?;
        let mut resolver = ReferenceResolver::new(self.resource.clone());
        let resolved = resolver.resolve(tree, &self.source).await?;

        if resolver.imported_count() == 0 {
            debug!("no external references in {}", self.source);
            return Ok(raw);
        }
        debug!(
            "imported {} referenced document(s) into {}",
            resolver.imported_count(),
            self.source
        );
        document::serialize(&resolved, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn location(dir: &Path, name: &str) -> Location {
        Location::parse(dir.join(name).to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_prepare_passes_bytes_through_without_import() {
        let dir = tempfile::tempdir().unwrap();
        let raw = "this is not even yaml: [\n";
        std::fs::write(dir.path().join("api.yaml"), raw).unwrap();

        let definition = Definition::new(location(dir.path(), "api.yaml"), false);
        assert_eq!(definition.prepare().await.unwrap(), raw);
    }

    #[tokio::test]
    async fn test_prepare_keeps_bytes_when_nothing_imported() {
        let dir = tempfile::tempdir().unwrap();
        // Odd but stable formatting that re-serialization would not keep.
        let raw = "openapi:   \"3.1.0\"\npaths:\n    {}\n";
        std::fs::write(dir.path().join("api.yaml"), raw).unwrap();

        let definition = Definition::new(location(dir.path(), "api.yaml"), true);
        assert_eq!(definition.prepare().await.unwrap(), raw);
    }

    #[tokio::test]
    async fn test_prepare_imports_yaml_and_stays_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("api.yaml"),
            "schema:\n  $ref: pet.yaml\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("pet.yaml"), "property: value\n").unwrap();

        let definition = Definition::new(location(dir.path(), "api.yaml"), true);
        let prepared = definition.prepare().await.unwrap();
        assert!(prepared.contains("property: value"));
        assert!(!prepared.contains("$ref"));
    }

    #[tokio::test]
    async fn test_prepare_imports_json_and_stays_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("api.json"),
            r#"{"schema": {"$ref": "pet.json"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("pet.json"), r#"{"property": "value"}"#).unwrap();

        let definition = Definition::new(location(dir.path(), "api.json"), true);
        let prepared = definition.prepare().await.unwrap();
        assert!(prepared.contains("\"property\": \"value\""));
        let parsed: serde_json::Value = serde_json::from_str(&prepared).unwrap();
        assert_eq!(parsed["schema"]["property"], "value");
    }

    #[tokio::test]
    async fn test_prepare_surfaces_parse_errors_when_importing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api.yaml"), "a: [1, 2\nb: 2\n").unwrap();

        let definition = Definition::new(location(dir.path(), "api.yaml"), true);
        let err = definition.prepare().await.unwrap_err();
        assert!(err.to_string().contains("YAML parse error"));
    }
}
