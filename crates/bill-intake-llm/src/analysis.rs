//! Bill analysis responses returned after an upload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis parsing errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Analysis of an uploaded bill image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillAnalysis {
    /// Narrative analysis from the upload service
    pub analysis: String,
    /// Raw OCR text of the bill, when the service returns it
    #[serde(default)]
    pub extracted_text: Option<String>,
}

impl BillAnalysis {
    /// Text to feed into intake extraction.
    pub fn scan_text(&self) -> String {
        match &self.extracted_text {
            Some(extracted) if !extracted.trim().is_empty() => {
                format!("{}\n{}", self.analysis, extracted)
            }
            _ => self.analysis.clone(),
        }
    }
}

/// Parse an upload service response.
///
/// The service normally returns a JSON object, sometimes wrapped in prose.
/// A response with no JSON object at all is taken as plain analysis text.
pub fn parse_bill_analysis(raw: &str) -> AnalysisResult<BillAnalysis> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidFormat("Empty analysis response".into()));
    }

    let (Some(json_start), Some(json_end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        tracing::debug!("analysis response has no JSON object, using as plain text");
        return Ok(BillAnalysis {
            analysis: trimmed.to_string(),
            extracted_text: None,
        });
    };
    if json_end < json_start {
        return Err(AnalysisError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    let analysis: BillAnalysis = serde_json::from_str(&trimmed[json_start..=json_end])?;
    if analysis.analysis.trim().is_empty() {
        return Err(AnalysisError::InvalidFormat("Analysis text is empty".into()));
    }

    Ok(analysis)
}
