use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Which remote enumeration an option list is populated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Materials,
    Fuels,
}

impl OptionKind {
    /// Placeholder entry shown before any real option.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Materials => "Select Material",
            Self::Fuels => "Select Fuel",
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Materials => write!(f, "materials"),
            Self::Fuels => write!(f, "fuels"),
        }
    }
}

/// Load status of an option list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Failed(ApiError),
}

/// A dropdown's options, populated once at startup and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionList {
    items: Vec<String>,
    status: LoadStatus,
}

impl OptionList {
    pub fn loaded(items: Vec<String>) -> Self {
        Self {
            items,
            status: LoadStatus::Loaded,
        }
    }

    pub fn failed(error: ApiError) -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Failed(error),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == LoadStatus::Pending
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }
}

/// Body of `POST /calculate`.
///
/// Every field travels exactly as typed; the service does its own parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub material: String,
    pub fuel_type: String,
    pub height: String,
    pub diameter: String,
    pub fuel_fill_percentage: String,
}

/// Response of `POST /calculate`. Only `delta_v` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Delta-v in meters per second.
    pub delta_v: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CalculationResult {
    pub fn new(delta_v: f64) -> Self {
        Self {
            delta_v,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Endpoint;
    use serde_json::json;

    #[test]
    fn request_serializes_exactly_five_string_fields() {
        let req = CalculationRequest {
            material: "Steel".into(),
            fuel_type: "Hydrazine".into(),
            height: "10".into(),
            diameter: "2".into(),
            fuel_fill_percentage: "50".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["diameter", "fuel_fill_percentage", "fuel_type", "height", "material"]
        );
        assert!(obj.values().all(|v| v.is_string()));
    }

    #[test]
    fn result_keeps_unknown_fields() {
        let result: CalculationResult =
            serde_json::from_value(json!({"delta_v": 1234.5, "units": "m/s"})).unwrap();
        assert_eq!(result.delta_v, 1234.5);
        assert_eq!(result.extra.get("units"), Some(&json!("m/s")));
    }

    #[test]
    fn result_requires_delta_v() {
        let parsed = serde_json::from_value::<CalculationResult>(json!({"error": "nope"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn failed_list_is_empty() {
        let list = OptionList::failed(ApiError::Decode {
            endpoint: Endpoint::Fuels,
            message: "expected array".into(),
        });
        assert!(list.items().is_empty());
        assert!(matches!(list.status(), LoadStatus::Failed(_)));
        assert!(!list.is_pending());
    }
}
