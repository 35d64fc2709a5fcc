use crate::adapters::http::encode_id;
use crate::domain::model::{
    Endpoint, KeyType, ProtocolInformation, Reference, SubmodelDescriptor,
};

/// 給 shell 使用的 submodel reference
pub fn submodel_reference(submodel_id: &str) -> Reference {
    Reference::model(KeyType::Submodel, submodel_id)
}

/// Descriptor pointing at the submodel inside `repository_url`.
pub fn submodel_descriptor(submodel_id: &str, repository_url: &str) -> SubmodelDescriptor {
    let href = format!(
        "{}/{}",
        repository_url.trim_end_matches('/'),
        encode_id(submodel_id)
    );

    SubmodelDescriptor {
        id: submodel_id.to_string(),
        endpoints: vec![Endpoint {
            interface: "http".to_string(),
            protocol_information: ProtocolInformation { href },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submodel_reference_shape() {
        assert_eq!(
            serde_json::to_value(submodel_reference("urn:sm:1")).unwrap(),
            json!({"type": "ModelReference", "keys": [{"type": "Submodel", "value": "urn:sm:1"}]})
        );
    }

    #[test]
    fn test_submodel_descriptor_shape() {
        let descriptor = submodel_descriptor("sm_id", "http://localhost:8081/");

        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "id": "sm_id",
                "endpoints": [{
                    "interface": "http",
                    "protocolInformation": {"href": "http://localhost:8081/c21faWQ"}
                }]
            })
        );
    }
}
