use crate::utils::error::ConversionError;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// AAS `NameType` 長度上限
pub const ID_SHORT_MAX_LEN: usize = 128;

static ID_SHORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid idShort pattern"));

/// 經過驗證的 idShort：非空、以字母開頭、只含字母數字與底線
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IdShort(String);

impl IdShort {
    pub fn new(raw: impl Into<String>) -> Result<Self, ConversionError> {
        let raw = raw.into();

        if raw.len() > ID_SHORT_MAX_LEN {
            return Err(ConversionError::InvalidIdShort {
                reason: format!("longer than {} characters", ID_SHORT_MAX_LEN),
                id: raw,
            });
        }

        if !ID_SHORT_PATTERN.is_match(&raw) {
            return Err(ConversionError::InvalidIdShort {
                reason: "must match ^[A-Za-z][A-Za-z0-9_]*$".to_string(),
                id: raw,
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdShort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    #[serde(rename = "xs:boolean")]
    Boolean,
    #[serde(rename = "xs:integer")]
    Integer,
    #[serde(rename = "xs:float")]
    Float,
    #[serde(rename = "xs:string")]
    String,
}

impl ValueKind {
    pub fn as_xsd(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "xs:boolean",
            ValueKind::Integer => "xs:integer",
            ValueKind::Float => "xs:float",
            ValueKind::String => "xs:string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_xsd())
    }
}

/// Property 的原生值，序列化時才轉成字串
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// 非純量（mapping / sequence）回傳 None
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Scalar::Null),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => Some(Scalar::Number(n.clone())),
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// JSON lexical text (`true`, `1.5`); null has no text.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

fn serialize_scalar<S: Serializer>(value: &Scalar, serializer: S) -> Result<S::Ok, S::Error> {
    match value.display_text() {
        Some(text) => serializer.serialize_str(&text),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_short: Option<IdShort>,
    pub value_type: ValueKind,
    #[serde(serialize_with = "serialize_scalar", skip_serializing_if = "Scalar::is_null")]
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_short: Option<IdShort>,
    pub value: Vec<Element>,
}

/// List 成員的型態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListElementKind {
    Property(ValueKind),
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListElementType {
    Property,
    #[serde(rename = "SubmodelElementCollection")]
    Collection,
}

/// 有序、同質的 SubmodelElementList
///
/// Members carry no idShort. The constructor is the only way to pair the
/// element kind with its children, so the declared kind always matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(skip_serializing_if = "Option::is_none")]
    id_short: Option<IdShort>,
    type_value_list_element: ListElementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_type_list_element: Option<ValueKind>,
    value: Vec<Element>,
}

impl List {
    pub(crate) fn new(
        id_short: Option<IdShort>,
        element_kind: ListElementKind,
        value: Vec<Element>,
    ) -> Self {
        let (type_value_list_element, value_type_list_element) = match element_kind {
            ListElementKind::Property(kind) => (ListElementType::Property, Some(kind)),
            ListElementKind::Collection => (ListElementType::Collection, None),
        };

        Self {
            id_short,
            type_value_list_element,
            value_type_list_element,
            value,
        }
    }

    pub fn id_short(&self) -> Option<&IdShort> {
        self.id_short.as_ref()
    }

    pub fn element_kind(&self) -> ListElementKind {
        match (self.type_value_list_element, self.value_type_list_element) {
            (ListElementType::Collection, _) => ListElementKind::Collection,
            (ListElementType::Property, kind) => {
                ListElementKind::Property(kind.unwrap_or(ValueKind::String))
            }
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.value
    }
}

/// 轉換後樹的節點
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modelType")]
pub enum Element {
    Property(Property),
    #[serde(rename = "SubmodelElementCollection")]
    Collection(Collection),
    #[serde(rename = "SubmodelElementList")]
    List(List),
}

impl Element {
    pub fn id_short(&self) -> Option<&IdShort> {
        match self {
            Element::Property(p) => p.id_short.as_ref(),
            Element::Collection(c) => c.id_short.as_ref(),
            Element::List(l) => l.id_short(),
        }
    }

    pub fn model_type(&self) -> &'static str {
        match self {
            Element::Property(_) => "Property",
            Element::Collection(_) => "SubmodelElementCollection",
            Element::List(_) => "SubmodelElementList",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    ExternalReference,
    ModelReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    AssetAdministrationShell,
    ConceptDescription,
    Submodel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub value: String,
}

/// 單一 key 的 reference，建立後不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    pub keys: Vec<Key>,
}

impl Reference {
    pub fn external(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::ExternalReference,
            keys: vec![Key {
                key_type,
                value: value.into(),
            }],
        }
    }

    pub fn model(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::ModelReference,
            keys: vec![Key {
                key_type,
                value: value.into(),
            }],
        }
    }

    pub fn references(&self, value: &str) -> bool {
        self.keys.iter().any(|key| key.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub struct Submodel {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_short: Option<IdShort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    pub submodel_elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInformation {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub interface: String,
    pub protocol_information: ProtocolInformation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelDescriptor {
    pub id: String,
    pub endpoints: Vec<Endpoint>,
}

/// 轉換過程中被捨棄、跳過、合併或降級的項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Normalized id came out empty.
    Dropped,
    Skipped { reason: String },
    Deduplicated { id: String },
    Degraded { kinds: Vec<ValueKind> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

/// 一次轉換的結果：submodel 以及診斷清單
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub submodel: Submodel,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.submodel)
    }

    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.submodel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_short_grammar() {
        assert!(IdShort::new("ansible_eth0").is_ok());
        assert!(IdShort::new("A").is_ok());
        assert!(IdShort::new("").is_err());
        assert!(IdShort::new("1abc").is_err());
        assert!(IdShort::new("my-key").is_err());
        assert!(IdShort::new("_hidden").is_err());
        assert!(IdShort::new("a".repeat(ID_SHORT_MAX_LEN)).is_ok());
        assert!(IdShort::new("a".repeat(ID_SHORT_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_property_serialization() {
        let property = Element::Property(Property {
            id_short: Some(IdShort::new("enabled").unwrap()),
            value_type: ValueKind::Boolean,
            value: Scalar::Bool(true),
        });

        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({
                "modelType": "Property",
                "idShort": "enabled",
                "valueType": "xs:boolean",
                "value": "true"
            })
        );
    }

    #[test]
    fn test_null_property_omits_value() {
        let property = Element::Property(Property {
            id_short: Some(IdShort::new("missing").unwrap()),
            value_type: ValueKind::String,
            value: Scalar::Null,
        });

        let json = serde_json::to_value(&property).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["valueType"], "xs:string");
    }

    #[test]
    fn test_list_serialization_by_element_kind() {
        let member = Element::Property(Property {
            id_short: None,
            value_type: ValueKind::Integer,
            value: Scalar::Number(7.into()),
        });
        let properties = Element::List(List::new(
            Some(IdShort::new("ports").unwrap()),
            ListElementKind::Property(ValueKind::Integer),
            vec![member],
        ));

        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({
                "modelType": "SubmodelElementList",
                "idShort": "ports",
                "typeValueListElement": "Property",
                "valueTypeListElement": "xs:integer",
                "value": [{"modelType": "Property", "valueType": "xs:integer", "value": "7"}]
            })
        );

        let collections = Element::List(List::new(
            Some(IdShort::new("mounts").unwrap()),
            ListElementKind::Collection,
            vec![],
        ));
        let json = serde_json::to_value(&collections).unwrap();
        assert_eq!(json["typeValueListElement"], "SubmodelElementCollection");
        assert!(json.get("valueTypeListElement").is_none());
    }

    #[test]
    fn test_submodel_serialization() {
        let submodel = Submodel {
            id: "urn:sm:1".to_string(),
            id_short: None,
            parent: Some(Reference::external(KeyType::AssetAdministrationShell, "urn:aas:1")),
            semantic_id: None,
            submodel_elements: vec![],
        };

        assert_eq!(
            serde_json::to_value(&submodel).unwrap(),
            json!({
                "modelType": "Submodel",
                "id": "urn:sm:1",
                "parent": {
                    "type": "ExternalReference",
                    "keys": [{"type": "AssetAdministrationShell", "value": "urn:aas:1"}]
                },
                "submodelElements": []
            })
        );
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diagnostic = Diagnostic {
            path: "facts.list1".to_string(),
            kind: DiagnosticKind::Degraded {
                kinds: vec![ValueKind::String, ValueKind::Integer],
            },
        };

        assert_eq!(
            serde_json::to_value(&diagnostic).unwrap(),
            json!({"path": "facts.list1", "kind": "degraded", "kinds": ["xs:string", "xs:integer"]})
        );
    }
}
