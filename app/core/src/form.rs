//! Form state: five text fields plus the native-control constraints
//! checked before a submission is allowed.

use thiserror::Error;

use crate::types::{CalculationRequest, OptionKind};

/// The five fixed form keys, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Material,
    FuelType,
    Height,
    Diameter,
    FuelFillPercentage,
}

/// How a field is edited and what the control itself enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Select(OptionKind),
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Material,
        FormField::FuelType,
        FormField::Height,
        FormField::Diameter,
        FormField::FuelFillPercentage,
    ];

    /// Wire key in the `/calculate` body.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::FuelType => "fuel_type",
            Self::Height => "height",
            Self::Diameter => "diameter",
            Self::FuelFillPercentage => "fuel_fill_percentage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::FuelType => "Fuel Type",
            Self::Height => "Height (m)",
            Self::Diameter => "Diameter (m)",
            Self::FuelFillPercentage => "Fuel Fill Percentage (0 to 100)",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Material => FieldKind::Select(OptionKind::Materials),
            Self::FuelType => FieldKind::Select(OptionKind::Fuels),
            Self::Height | Self::Diameter => FieldKind::Number {
                min: None,
                max: None,
                step: None,
            },
            Self::FuelFillPercentage => FieldKind::Number {
                min: Some(0.0),
                max: Some(100.0),
                step: Some(0.01),
            },
        }
    }

    /// Check the control-level constraints for a value.
    pub fn check(&self, value: &str) -> Result<(), FieldIssue> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FieldIssue::Missing);
        }
        let FieldKind::Number { min, max, step } = self.kind() else {
            return Ok(());
        };
        let number: f64 = value.parse().map_err(|_| FieldIssue::NotANumber)?;
        if !number.is_finite() {
            return Err(FieldIssue::NotANumber);
        }
        if let Some(min) = min {
            if number < min {
                return Err(FieldIssue::BelowMin(min));
            }
        }
        if let Some(max) = max {
            if number > max {
                return Err(FieldIssue::AboveMax(max));
            }
        }
        if let Some(step) = step {
            let base = min.unwrap_or(0.0);
            let q = (number - base) / step;
            if (q - q.round()).abs() > 1e-6 {
                return Err(FieldIssue::StepMismatch(step));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a field blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldIssue {
    #[error("Please fill out this field.")]
    Missing,
    #[error("Please enter a number.")]
    NotANumber,
    #[error("Value must be greater than or equal to {0}.")]
    BelowMin(f64),
    #[error("Value must be less than or equal to {0}.")]
    AboveMax(f64),
    #[error("Value must be a multiple of {0}.")]
    StepMismatch(f64),
}

/// Text values of the five fields, held verbatim until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    material: String,
    fuel_type: String,
    height: String,
    diameter: String,
    fuel_fill_percentage: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Material => &self.material,
            FormField::FuelType => &self.fuel_type,
            FormField::Height => &self.height,
            FormField::Diameter => &self.diameter,
            FormField::FuelFillPercentage => &self.fuel_fill_percentage,
        }
    }

    /// Overwrite exactly one key.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Material => &mut self.material,
            FormField::FuelType => &mut self.fuel_type,
            FormField::Height => &mut self.height,
            FormField::Diameter => &mut self.diameter,
            FormField::FuelFillPercentage => &mut self.fuel_fill_percentage,
        };
        *slot = value.into();
    }

    /// All fields that currently block submission.
    pub fn issues(&self) -> Vec<(FormField, FieldIssue)> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| field.check(self.get(field)).err().map(|issue| (field, issue)))
            .collect()
    }

    /// Build the request body, or report what blocks it.
    pub fn validate(&self) -> Result<CalculationRequest, Vec<(FormField, FieldIssue)>> {
        let issues = self.issues();
        if !issues.is_empty() {
            return Err(issues);
        }
        Ok(self.to_request())
    }

    /// Serialize as-is, without validation.
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            material: self.material.clone(),
            fuel_type: self.fuel_type.clone(),
            height: self.height.clone(),
            diameter: self.diameter.clone(),
            fuel_fill_percentage: self.fuel_fill_percentage.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut form = FormState::default();
        form.set(FormField::Material, "Steel");
        form.set(FormField::FuelType, "Liquid Hydrogen");
        form.set(FormField::Height, "40");
        form.set(FormField::Diameter, "3.5");
        form.set(FormField::FuelFillPercentage, "85.25");
        form
    }

    #[test]
    fn set_overwrites_one_key() {
        let mut form = filled();
        form.set(FormField::Height, "41");
        assert_eq!(form.get(FormField::Height), "41");
        assert_eq!(form.get(FormField::Diameter), "3.5");
    }

    #[test]
    fn complete_form_validates_verbatim() {
        let req = filled().validate().unwrap();
        assert_eq!(req.height, "40");
        assert_eq!(req.fuel_fill_percentage, "85.25");
    }

    #[test]
    fn empty_form_reports_every_field_missing() {
        let issues = FormState::default().validate().unwrap_err();
        assert_eq!(issues.len(), 5);
        assert!(issues.iter().all(|(_, issue)| *issue == FieldIssue::Missing));
    }

    #[test]
    fn fill_percentage_bounds() {
        let f = FormField::FuelFillPercentage;
        assert_eq!(f.check("100"), Ok(()));
        assert_eq!(f.check("0"), Ok(()));
        assert_eq!(f.check("100.01"), Err(FieldIssue::AboveMax(100.0)));
        assert_eq!(f.check("-1"), Err(FieldIssue::BelowMin(0.0)));
        assert_eq!(f.check("33.333"), Err(FieldIssue::StepMismatch(0.01)));
    }

    #[test]
    fn number_fields_reject_text() {
        assert_eq!(FormField::Height.check("tall"), Err(FieldIssue::NotANumber));
        assert_eq!(FormField::Diameter.check("inf"), Err(FieldIssue::NotANumber));
        assert_eq!(FormField::Diameter.check("0.75"), Ok(()));
    }

    #[test]
    fn keys_match_request_body() {
        let body = serde_json::to_value(filled().to_request()).unwrap();
        for field in FormField::ALL {
            assert_eq!(body[field.key()], filled().get(field));
        }
    }
}
