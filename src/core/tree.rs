use crate::core::classify::classify;
use crate::core::normalize::normalize;
use crate::domain::model::{
    Collection, Diagnostic, DiagnosticKind, Element, IdShort, List, ListElementKind, Property,
    Scalar, ValueKind,
};
use crate::utils::error::ConversionError;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Container 的命名結果
enum Naming {
    /// List 成員沒有 idShort
    Anonymous,
    Named(IdShort),
    /// 計算出來的 id 為空
    Dropped,
}

impl Naming {
    fn into_id_short(self) -> Option<IdShort> {
        match self {
            Naming::Named(id) => Some(id),
            Naming::Anonymous | Naming::Dropped => None,
        }
    }
}

/// 將一份動態文件遞迴轉成 submodel element 樹
///
/// Each mapping level is deduplicated by id through an ordered map: on a
/// collision the later element replaces the earlier one but keeps the
/// earlier position. Sequence entries become anonymous list members and are
/// never deduplicated.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    normalize_container_ids: bool,
    diagnostics: Vec<Diagnostic>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開啟後 collection / list 的 key 也會經過 normalize（不加前綴）
    pub fn with_container_id_normalization(mut self, enabled: bool) -> Self {
        self.normalize_container_ids = enabled;
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// 文件根節點必須是 mapping
    pub fn build_root(&mut self, document: &Value) -> Result<Vec<Element>, ConversionError> {
        match document {
            Value::Object(map) => self.build_mapping(map, "", ""),
            other => Err(ConversionError::InvalidDocument {
                found: json_kind(other).to_string(),
            }),
        }
    }

    fn build_mapping(
        &mut self,
        map: &Map<String, Value>,
        level_key: &str,
        path: &str,
    ) -> Result<Vec<Element>, ConversionError> {
        let mut elements: IndexMap<IdShort, Element> = IndexMap::with_capacity(map.len());

        for (key, value) in map {
            let entry_path = join_key(path, key);
            let Some(element) = self.build_entry(Some(key), value, level_key, &entry_path)? else {
                continue;
            };
            let Some(id) = element.id_short().cloned() else {
                continue;
            };

            if elements.insert(id.clone(), element).is_some() {
                tracing::warn!("⚠️ Duplicate idShort '{}' at '{}', keeping the later element", id, entry_path);
                self.record(&entry_path, DiagnosticKind::Deduplicated { id: id.to_string() });
            }
        }

        Ok(elements.into_values().collect())
    }

    fn build_sequence(
        &mut self,
        items: &[Value],
        level_key: &str,
        path: &str,
    ) -> Result<Vec<Element>, ConversionError> {
        let mut elements = Vec::with_capacity(items.len());

        for (index, value) in items.iter().enumerate() {
            let entry_path = format!("{}[{}]", path, index);
            if let Some(element) = self.build_entry(None, value, level_key, &entry_path)? {
                elements.push(element);
            }
        }

        Ok(elements)
    }

    fn build_entry(
        &mut self,
        key: Option<&str>,
        value: &Value,
        level_key: &str,
        path: &str,
    ) -> Result<Option<Element>, ConversionError> {
        tracing::debug!("Converting '{}' ({})", path, json_kind(value));

        match value {
            Value::Object(map) => {
                let id_short = match self.container_naming(key, path)? {
                    Naming::Dropped => return Ok(None),
                    naming => naming.into_id_short(),
                };
                let children = self.build_mapping(map, key.unwrap_or(""), path)?;

                Ok(Some(Element::Collection(Collection {
                    id_short,
                    value: children,
                })))
            }
            Value::Array(items) => {
                let id_short = match self.container_naming(key, path)? {
                    Naming::Dropped => return Ok(None),
                    naming => naming.into_id_short(),
                };
                let candidates = self.build_sequence(items, key.unwrap_or(""), path)?;

                self.assemble_list(id_short, candidates, path).map(Some)
            }
            Value::Null => Ok(self.build_property(key, Scalar::Null, level_key, path)),
            Value::Bool(b) => Ok(self.build_property(key, Scalar::Bool(*b), level_key, path)),
            Value::Number(n) => {
                Ok(self.build_property(key, Scalar::Number(n.clone()), level_key, path))
            }
            Value::String(s) => {
                Ok(self.build_property(key, Scalar::Text(s.clone()), level_key, path))
            }
        }
    }

    fn container_naming(&mut self, key: Option<&str>, path: &str) -> Result<Naming, ConversionError> {
        let Some(key) = key else {
            return Ok(Naming::Anonymous);
        };

        let id = if self.normalize_container_ids {
            normalize(key, "")
        } else {
            key.to_string()
        };

        if id.is_empty() {
            tracing::debug!("Dropping '{}': empty idShort", path);
            self.record(path, DiagnosticKind::Dropped);
            return Ok(Naming::Dropped);
        }

        IdShort::new(id).map(Naming::Named)
    }

    fn build_property(
        &mut self,
        key: Option<&str>,
        value: Scalar,
        level_key: &str,
        path: &str,
    ) -> Option<Element> {
        let value_type = classify(&value);

        let id_short = match key {
            None => None,
            Some(key) => {
                let id = normalize(key, level_key);
                if id.is_empty() {
                    tracing::debug!("Dropping '{}': empty idShort", path);
                    self.record(path, DiagnosticKind::Dropped);
                    return None;
                }

                match IdShort::new(id) {
                    Ok(id_short) => Some(id_short),
                    Err(e) => {
                        tracing::warn!("⚠️ Skipping '{}': {}", path, e);
                        self.record(
                            path,
                            DiagnosticKind::Skipped {
                                reason: e.to_string(),
                            },
                        );
                        return None;
                    }
                }
            }
        };

        Some(Element::Property(Property {
            id_short,
            value_type,
            value,
        }))
    }

    /// 決定 list 的型態；混合 value type 時降級為字串 list
    fn assemble_list(
        &mut self,
        id_short: Option<IdShort>,
        candidates: Vec<Element>,
        path: &str,
    ) -> Result<Element, ConversionError> {
        if candidates.is_empty() {
            return Ok(Element::List(List::new(
                id_short,
                ListElementKind::Property(ValueKind::String),
                candidates,
            )));
        }

        if candidates.iter().all(|c| matches!(c, Element::Collection(_))) {
            return Ok(Element::List(List::new(
                id_short,
                ListElementKind::Collection,
                candidates,
            )));
        }

        let mut kinds: Vec<ValueKind> = Vec::new();
        for candidate in &candidates {
            match candidate {
                Element::Property(property) => {
                    if !kinds.contains(&property.value_type) {
                        kinds.push(property.value_type);
                    }
                }
                Element::Collection(_) | Element::List(_) => {
                    return Err(ConversionError::HeterogeneousList {
                        id: id_short.map(|id| id.to_string()).unwrap_or_else(|| path.to_string()),
                        shapes: describe_shapes(&candidates),
                    });
                }
            }
        }

        if let [kind] = kinds.as_slice() {
            return Ok(Element::List(List::new(
                id_short,
                ListElementKind::Property(*kind),
                candidates,
            )));
        }

        tracing::info!("🔁 List '{}' mixes {:?}, degrading members to xs:string", path, kinds);
        self.record(path, DiagnosticKind::Degraded { kinds });

        let degraded = candidates
            .into_iter()
            .map(|candidate| match candidate {
                Element::Property(property) => Element::Property(degrade_property(property)),
                other => other,
            })
            .collect();

        Ok(Element::List(List::new(
            id_short,
            ListElementKind::Property(ValueKind::String),
            degraded,
        )))
    }

    fn record(&mut self, path: &str, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            path: path.to_string(),
            kind,
        });
    }
}

/// 降級後的文字採 JSON 字面表示（`true`、`1.5`），null 仍為 null
fn degrade_property(property: Property) -> Property {
    let value = match property.value.display_text() {
        Some(text) => Scalar::Text(text),
        None => Scalar::Null,
    };

    Property {
        id_short: property.id_short,
        value_type: ValueKind::String,
        value,
    }
}

fn describe_shapes(elements: &[Element]) -> String {
    let mut shapes: Vec<&str> = Vec::new();
    for element in elements {
        let shape = element.model_type();
        if !shapes.contains(&shape) {
            shapes.push(shape);
        }
    }
    shapes.join(", ")
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
