use crate::core::tree::TreeBuilder;
use crate::domain::model::{Conversion, IdShort, KeyType, Reference, Submodel};
use crate::utils::error::{ConversionError, Result};

/// 組出 submodel 根節點；純函式，不做任何 I/O
#[derive(Debug, Clone, Default)]
pub struct SubmodelAssembler {
    id_short: Option<String>,
    parent: Option<String>,
    semantic_id: Option<String>,
    normalize_container_ids: bool,
}

impl SubmodelAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_short(mut self, id_short: Option<impl Into<String>>) -> Self {
        self.id_short = id_short.map(Into::into);
        self
    }

    /// Administration shell that owns the submodel.
    pub fn parent(mut self, parent: Option<impl Into<String>>) -> Self {
        self.parent = parent.map(Into::into);
        self
    }

    /// Concept description id or URI.
    pub fn semantic_id(mut self, semantic_id: Option<impl Into<String>>) -> Self {
        self.semantic_id = semantic_id.map(Into::into);
        self
    }

    pub fn normalize_container_ids(mut self, enabled: bool) -> Self {
        self.normalize_container_ids = enabled;
        self
    }

    pub fn assemble(
        &self,
        id: &str,
        document: &serde_json::Value,
    ) -> std::result::Result<Conversion, ConversionError> {
        let id_short = self.id_short.clone().map(IdShort::new).transpose()?;

        let mut builder =
            TreeBuilder::new().with_container_id_normalization(self.normalize_container_ids);
        let submodel_elements = builder.build_root(document)?;
        let diagnostics = builder.into_diagnostics();

        tracing::debug!(
            "Assembled submodel '{}' with {} top-level elements ({} diagnostics)",
            id,
            submodel_elements.len(),
            diagnostics.len()
        );

        let submodel = Submodel {
            id: id.to_string(),
            id_short,
            parent: self
                .parent
                .as_ref()
                .map(|parent| Reference::external(KeyType::AssetAdministrationShell, parent)),
            semantic_id: self
                .semantic_id
                .as_ref()
                .map(|semantic| Reference::external(KeyType::ConceptDescription, semantic)),
            submodel_elements,
        };

        Ok(Conversion {
            submodel,
            diagnostics,
        })
    }
}

pub fn assemble(
    id: &str,
    document: &serde_json::Value,
    parent: Option<&str>,
    semantic: Option<&str>,
) -> std::result::Result<Conversion, ConversionError> {
    SubmodelAssembler::new()
        .parent(parent)
        .semantic_id(semantic)
        .assemble(id, document)
}

/// 直接輸出 AAS JSON
pub fn convert(
    submodel_id: &str,
    document: &serde_json::Value,
    parent: Option<&str>,
    semantic: Option<&str>,
) -> Result<serde_json::Value> {
    let conversion = assemble(submodel_id, document, parent, semantic)?;
    Ok(conversion.to_json()?)
}
