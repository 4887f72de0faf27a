use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::debug;

use crate::document;
use crate::error::{CoreError, CoreResult};
use crate::location::Location;
use crate::resource::Resource;

/// Key that marks a reference object.
pub const REF_KEY: &str = "$ref";

/// Ordered chain of documents currently being imported.
///
/// Entering a location that is already on the chain is a circular import;
/// the error carries the full chain so the user can see how the loop closes.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    active: Vec<Location>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub fn enter(&mut self, location: Location) -> CoreResult<()> {
        if self.active.contains(&location) {
            let mut chain: Vec<String> = self.active.iter().map(|l| l.to_string()).collect();
            chain.push(location.to_string());
            return Err(CoreError::cycle(chain.join(" -> ")));
        }
        self.active.push(location);
        Ok(())
    }

    pub fn exit(&mut self) {
        self.active.pop();
    }
}

/// Resolves external `$ref` targets by importing their content in place.
///
/// Core idea:
/// 1. Operate directly on the JSON level, without a schema type system
/// 2. Recursively traverse; on an external `$ref`, fetch, parse and splice
///    the target content (internal `#/...` pointers stay untouched)
/// 3. Guard against circular imports with the active document chain
#[derive(Debug)]
pub struct ReferenceResolver {
    resource: Resource,
    context: ResolutionContext,
    imported: usize,
}

impl ReferenceResolver {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            context: ResolutionContext::new(),
            imported: 0,
        }
    }

    /// Number of documents imported by the last `resolve` call.
    pub fn imported_count(&self) -> usize {
        self.imported
    }

    /// Resolve all external references in `root`, which lives at `base`.
    pub async fn resolve(&mut self, root: Value, base: &Location) -> CoreResult<Value> {
        self.imported = 0;
        self.context = ResolutionContext::new();
        // Seed the chain with the root document so a reference back to it
        // is caught like any other cycle.
        self.context.enter(base.clone())?;
        let resolved = self.resolve_value(root, base).await;
        self.context.exit();
        resolved
    }

    // Recursion passes through a boxed future, otherwise the async state
    // machine would have infinite size.
    fn resolve_value<'a>(
        &'a mut self,
        value: Value,
        base: &'a Location,
    ) -> BoxFuture<'a, CoreResult<Value>> {
        Box::pin(async move {
            match value {
                Value::Object(map) => self.resolve_mapping(map, base).await,
                Value::Array(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for item in items {
                        resolved.push(self.resolve_value(item, base).await?);
                    }
                    Ok(Value::Array(resolved))
                }
                other => Ok(other),
            }
        })
    }

    async fn resolve_mapping(
        &mut self,
        map: Map<String, Value>,
        base: &Location,
    ) -> CoreResult<Value> {
        let target = match map.get(REF_KEY) {
            Some(Value::String(raw)) => RefTarget::parse(raw),
            _ => None,
        };

        let Some(target) = target else {
            // No external reference here. The marker of an internal pointer
            // stays as-is, but sibling values may still import documents.
            let mut resolved = Map::with_capacity(map.len());
            for (key, value) in map {
                if key == REF_KEY {
                    resolved.insert(key, value);
                } else {
                    resolved.insert(key, self.resolve_value(value, base).await?);
                }
            }
            return Ok(Value::Object(resolved));
        };

        let mut siblings = Map::with_capacity(map.len());
        for (key, value) in map {
            if key == REF_KEY {
                continue;
            }
            siblings.insert(key, self.resolve_value(value, base).await?);
        }

        let content = self.import(&target, base).await?;
        Ok(merge_reference(content, siblings))
    }

    async fn import(&mut self, target: &RefTarget, base: &Location) -> CoreResult<Value> {
        let location = base.join(&target.location)?;
        debug!("importing reference {}", location);
        self.context.enter(location.clone())?;
        let imported = self.import_inner(target, &location).await;
        self.context.exit();
        imported
    }

    async fn import_inner(&mut self, target: &RefTarget, location: &Location) -> CoreResult<Value> {
        let text = self.resource.read(location).await?;
        let (tree, _) = match document::parse(&text) {
            Ok(parsed) => parsed,
            Err(CoreError::Parse(msg)) => {
                return Err(CoreError::reference(format!(
                    "cannot parse {}: {}",
                    location, msg
                )))
            }
            Err(other) => return Err(other),
        };
        let resolved = self.resolve_value(tree, location).await?;
        self.imported += 1;
        select_fragment(&resolved, target.fragment.as_deref().unwrap_or(""), location)
    }
}

/// An external reference target: a document location plus an optional
/// `/`-prefixed fragment pointer inside it.
#[derive(Debug)]
struct RefTarget {
    location: String,
    fragment: Option<String>,
}

impl RefTarget {
    /// Split a raw `$ref` string. Returns `None` for internal pointers
    /// (`#/components/...`), which belong to the enclosing document.
    fn parse(raw: &str) -> Option<Self> {
        match raw.split_once('#') {
            Some(("", _)) => None,
            Some((location, fragment)) => Some(RefTarget {
                location: location.to_string(),
                fragment: Some(fragment.to_string()),
            }),
            None => {
                if raw.is_empty() {
                    None
                } else {
                    Some(RefTarget {
                        location: raw.to_string(),
                        fragment: None,
                    })
                }
            }
        }
    }
}

// Sibling keys next to an external reference survive the import. The
// referenced mapping wins on key conflicts; non-mapping content replaces
// the object wholesale.
fn merge_reference(content: Value, siblings: Map<String, Value>) -> Value {
    if siblings.is_empty() {
        return content;
    }
    match content {
        Value::Object(target) => {
            let mut merged = siblings;
            for (key, value) in target {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        other => other,
    }
}

fn select_fragment(value: &Value, fragment: &str, location: &Location) -> CoreResult<Value> {
    if fragment.is_empty() {
        return Ok(value.clone());
    }
    let Some(pointer) = fragment.strip_prefix('/') else {
        return Err(CoreError::reference(format!(
            "invalid fragment '#{}' in reference to {}: expected a '/'-prefixed pointer",
            fragment, location
        )));
    };

    let mut current = value;
    for raw_segment in pointer.split('/') {
        let segment = raw_segment.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Object(map) => map.get(&segment).ok_or_else(|| {
                CoreError::reference(format!(
                    "fragment '#{}' not found in {}: no key '{}'",
                    fragment, location, segment
                ))
            })?,
            Value::Array(items) => {
                let index: usize = segment.parse().map_err(|_| {
                    CoreError::reference(format!(
                        "fragment '#{}' in {}: '{}' is not an array index",
                        fragment, location, segment
                    ))
                })?;
                items.get(index).ok_or_else(|| {
                    CoreError::reference(format!(
                        "fragment '#{}' in {}: index {} out of bounds",
                        fragment, location, index
                    ))
                })?
            }
            _ => {
                return Err(CoreError::reference(format!(
                    "fragment '#{}' in {}: cannot traverse into scalar at '{}'",
                    fragment, location, segment
                )))
            }
        };
    }
    Ok(current.clone())
}
