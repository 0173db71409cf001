//! Module declaration schema: the extension contract for new modules.
//!
//! A module declares its name, a package tag, and the closed set of
//! operations it owns, each with a numeric kind and typed fields. The
//! declaration doubles as the input format of the external code generator
//! and as the source for building a [`KindRegistry`] over custom modules.
//!
//! [`KindRegistry`]: crate::registry::KindRegistry

use serde::{Deserialize, Serialize};

/// One typed field of an operation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name in the generated record.
    pub name: String,
    /// Scalar field type (e.g. `"string"`).
    #[serde(rename = "type")]
    pub field_type: String,
    /// Wire tag name on the envelope.
    pub tag: String,
    /// Whether the field must be present.
    pub required: bool,
    /// Whether the field carries multiple values (a tag with a value list).
    pub multiple: bool,
}

/// One operation owned by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSchema {
    /// Record name (e.g. `"PostEvent"`).
    pub name: String,
    /// Operation name on the wire (e.g. `"post"`).
    pub operation: String,
    /// Kind number within the module's reserved block.
    pub kind: u32,
    /// Payload fields.
    pub fields: Vec<FieldSchema>,
    /// Human-readable description.
    pub description: String,
}

/// A complete module declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSchema {
    /// Module name (e.g. `"governance"`).
    pub name: String,
    /// Package/namespace tag for generated code.
    pub package: String,
    /// Human-readable description.
    pub description: String,
    /// Operations in this module.
    pub events: Vec<OperationSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::KindRegistry;

    fn sample_module() -> ModuleSchema {
        ModuleSchema {
            name: "inventory".into(),
            package: "inv01".into(),
            description: "Inventory tracking operations".into(),
            events: vec![
                OperationSchema {
                    name: "StockEvent".into(),
                    operation: "stock".into(),
                    kind: 30801,
                    fields: vec![FieldSchema {
                        name: "ItemID".into(),
                        field_type: "string".into(),
                        tag: "item_id".into(),
                        required: true,
                        multiple: false,
                    }],
                    description: "Record a stock level".into(),
                },
                OperationSchema {
                    name: "TransferEvent".into(),
                    operation: "transfer".into(),
                    kind: 30802,
                    fields: vec![],
                    description: "Move stock between locations".into(),
                },
            ],
        }
    }

    #[test]
    fn json_round_trip_preserves_wire_names() {
        let module = sample_module();
        let json = serde_json::to_string(&module).unwrap();
        assert!(json.contains("\"type\":\"string\""));
        assert!(json.contains("\"package\":\"inv01\""));
        let back: ModuleSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, module);
    }

    #[test]
    fn registry_from_module_declarations() {
        let module = sample_module();
        let registry = KindRegistry::from_modules([&module]).unwrap();
        assert_eq!(registry.operation_for(30801), Some("stock"));
        assert_eq!(registry.kind_for("transfer"), Some(30802));
    }

    #[test]
    fn registry_rejects_overlapping_declarations() {
        let module = sample_module();
        let mut clashing = sample_module();
        clashing.name = "clashing".into();
        assert!(KindRegistry::from_modules([&module, &clashing]).is_err());
    }
}
