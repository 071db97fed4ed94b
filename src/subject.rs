//! Subject descriptor (which vehicle/color to show) and color swatches

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::frames::ResolveError;

/// Identifies one FrameSet: model + exterior color (+ interior color)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub model: String,
    pub exterior_color: String,
    #[serde(default)]
    pub interior_color: String,
}

impl Subject {
    pub fn new(model: impl Into<String>, exterior_color: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            exterior_color: exterior_color.into(),
            interior_color: String::new(),
        }
    }

    pub fn with_interior(mut self, interior_color: impl Into<String>) -> Self {
        self.interior_color = interior_color.into();
        self
    }

    /// Same subject with another exterior color (model and interior kept)
    pub fn with_exterior(&self, exterior_color: &str) -> Self {
        Self {
            exterior_color: exterior_color.to_string(),
            ..self.clone()
        }
    }

    /// Check that model/colors are usable as single path segments.
    ///
    /// Interior color may be empty; model and exterior may not.
    pub fn validate(&self) -> Result<(), ResolveError> {
        for (field, value, required) in [
            ("model", &self.model, true),
            ("exterior_color", &self.exterior_color, true),
            ("interior_color", &self.interior_color, false),
        ] {
            if value.is_empty() {
                if required {
                    return Err(ResolveError::InvalidSubject(format!("{} is empty", field)));
                }
                continue;
            }
            if !is_path_segment(value) {
                return Err(ResolveError::InvalidSubject(format!(
                    "{} '{}' is not a plain name",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.exterior_color)?;
        if !self.interior_color.is_empty() {
            write!(f, " ({})", self.interior_color)?;
        }
        Ok(())
    }
}

fn is_path_segment(s: &str) -> bool {
    s != "." && s != ".." && !s.contains(['/', '\\']) && !s.chars().any(char::is_control)
}

/// Exterior color choice shown in the swatch strip.
///
/// `extension` is the swatch image format (`abp.png`, `swp.svg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub code: String,
    pub extension: String,
}

impl ColorSwatch {
    pub fn new(code: &str, extension: &str) -> Self {
        Self {
            code: code.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Swatch image file name, e.g. `abp.png`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.code, self.extension)
    }
}

/// Built-in palette
pub fn default_swatches() -> Vec<ColorSwatch> {
    vec![ColorSwatch::new("swp", "svg"), ColorSwatch::new("abp", "png")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_exterior_keeps_other_fields() {
        let s = Subject::new("k9", "abp").with_interior("black");
        let t = s.with_exterior("swp");
        assert_eq!(t.model, "k9");
        assert_eq!(t.exterior_color, "swp");
        assert_eq!(t.interior_color, "black");
        assert_ne!(s, t);
    }

    #[test]
    fn test_validate() {
        assert!(Subject::new("k9", "abp").validate().is_ok());
        assert!(Subject::new("", "abp").validate().is_err());
        assert!(Subject::new("k9", "").validate().is_err());
        assert!(Subject::new("..", "abp").validate().is_err());
        assert!(Subject::new("k9", "a/b").validate().is_err());
        assert!(Subject::new("k9", "abp").with_interior("..\\x").validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Subject::new("k9", "abp").to_string(), "k9/abp");
        assert_eq!(
            Subject::new("k9", "abp").with_interior("beige").to_string(),
            "k9/abp (beige)"
        );
    }

    #[test]
    fn test_deserialize_without_interior() {
        let s: Subject = serde_json::from_str(r#"{"model":"k9","exterior_color":"swp"}"#).unwrap();
        assert_eq!(s, Subject::new("k9", "swp"));
    }

    #[test]
    fn test_default_swatches() {
        let names: Vec<String> = default_swatches().iter().map(|s| s.file_name()).collect();
        assert_eq!(names, ["swp.svg", "abp.png"]);
    }
}
