//! Clinical patient record
//!
//! Field domains follow the intake form of the original dashboard; a
//! record outside these bounds never reaches the model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::logic::features::FEATURE_COUNT;

/// One patient's clinical inputs, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClinicalRecord {
    /// Age in years
    #[validate(range(min = 20, max = 90))]
    pub age: u32,
    /// 0 = female, 1 = male
    #[validate(range(min = 0, max = 1))]
    pub sex: u8,
    /// Chest pain type
    #[validate(range(min = 0, max = 3))]
    pub cp: u8,
    /// Resting blood pressure, mmHg
    #[validate(range(min = 80, max = 200))]
    pub trestbps: u32,
    /// Serum cholesterol, mg/dL
    #[validate(range(min = 100, max = 600))]
    pub chol: u32,
    /// Fasting blood sugar > 120 mg/dL
    #[validate(range(min = 0, max = 1))]
    pub fbs: u8,
    /// Resting ECG result
    #[validate(range(min = 0, max = 2))]
    pub restecg: u8,
    /// Maximum heart rate achieved, bpm
    #[validate(range(min = 60, max = 220))]
    pub thalach: u32,
    /// Exercise induced angina
    #[validate(range(min = 0, max = 1))]
    pub exang: u8,
    /// ST depression induced by exercise, mm
    #[validate(range(min = 0.0, max = 10.0))]
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment
    #[validate(range(min = 0, max = 2))]
    pub slope: u8,
    /// Major vessels colored by fluoroscopy
    #[validate(range(min = 0, max = 4))]
    pub ca: u8,
    /// Thalassemia code
    #[validate(range(min = 0, max = 3))]
    pub thal: u8,
}

impl ClinicalRecord {
    /// Check every field against its declared domain.
    /// The error names each offending field.
    pub fn validate_domains(&self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }

    /// Order the fields into the vector layout the model expects.
    pub fn to_ordered_values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            self.sex as f64,
            self.cp as f64,
            self.trestbps as f64,
            self.chol as f64,
            self.fbs as f64,
            self.restecg as f64,
            self.thalach as f64,
            self.exang as f64,
            self.oldpeak,
            self.slope as f64,
            self.ca as f64,
            self.thal as f64,
        ]
    }

    pub fn sex_description(&self) -> &'static str {
        if self.sex == 1 {
            "Male"
        } else {
            "Female"
        }
    }

    pub fn chest_pain_description(&self) -> &'static str {
        match self.cp {
            0 => "Asymptomatic",
            1 => "Typical Angina",
            2 => "Atypical Angina",
            3 => "Non-Anginal Pain",
            _ => "Unknown",
        }
    }

    pub fn ecg_description(&self) -> &'static str {
        match self.restecg {
            0 => "Normal",
            1 => "ST-T Abnormality",
            2 => "Left Ventricular Hypertrophy",
            _ => "Unknown",
        }
    }

    pub fn slope_description(&self) -> &'static str {
        match self.slope {
            0 => "Upsloping",
            1 => "Flat",
            2 => "Downsloping",
            _ => "Unknown",
        }
    }

    pub fn thal_description(&self) -> &'static str {
        match self.thal {
            0 => "Unknown",
            1 => "Normal",
            2 => "Fixed Defect",
            3 => "Reversible Defect",
            _ => "Unknown",
        }
    }

    pub fn fbs_description(&self) -> &'static str {
        if self.fbs == 1 {
            ">120 mg/dL"
        } else {
            "\u{2264}120 mg/dL"
        }
    }

    pub fn exang_description(&self) -> &'static str {
        if self.exang == 1 {
            "Present"
        } else {
            "Absent"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> ClinicalRecord {
        ClinicalRecord {
            age: 52,
            sex: 1,
            cp: 0,
            trestbps: 125,
            chol: 212,
            fbs: 0,
            restecg: 1,
            thalach: 168,
            exang: 0,
            oldpeak: 1.0,
            slope: 2,
            ca: 2,
            thal: 3,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate_domains().is_ok());
    }

    #[test]
    fn test_out_of_range_sex_names_field() {
        let mut record = valid_record();
        record.sex = 2;
        let err = record.validate_domains().unwrap_err();
        assert!(err.to_string().contains("sex"));
    }

    #[test]
    fn test_multiple_bad_fields_all_named() {
        let mut record = valid_record();
        record.chol = 9000;
        record.oldpeak = -1.0;
        let err = record.validate_domains().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("chol"));
        assert!(msg.contains("oldpeak"));
    }

    #[test]
    fn test_descriptions_match_clinical_coding() {
        let record = valid_record();
        assert_eq!(record.chest_pain_description(), "Asymptomatic");
        assert_eq!(record.ecg_description(), "ST-T Abnormality");
        assert_eq!(record.slope_description(), "Downsloping");
        assert_eq!(record.thal_description(), "Reversible Defect");
        assert_eq!(record.sex_description(), "Male");
    }

    #[test]
    fn test_ordered_values_width() {
        assert_eq!(valid_record().to_ordered_values().len(), FEATURE_COUNT);
    }
}
