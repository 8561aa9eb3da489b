use serde::{Deserialize, Serialize};

/// Dialogue reveal speed preference.
///
/// The backend stores the delay in milliseconds per character and accepts the
/// preference by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextSpeed {
    Slow,
    Medium,
    Fast,
}

impl TextSpeed {
    pub const SLOW_MILLIS: u32 = 100;
    pub const MEDIUM_MILLIS: u32 = 50;

    /// Classifies a stored delay. Anything other than the slow and medium
    /// delays counts as fast.
    pub fn from_millis(millis: u32) -> Self {
        match millis {
            Self::SLOW_MILLIS => TextSpeed::Slow,
            Self::MEDIUM_MILLIS => TextSpeed::Medium,
            _ => TextSpeed::Fast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_millis() {
        assert_eq!(TextSpeed::from_millis(100), TextSpeed::Slow);
        assert_eq!(TextSpeed::from_millis(50), TextSpeed::Medium);
        assert_eq!(TextSpeed::from_millis(10), TextSpeed::Fast);
        assert_eq!(TextSpeed::from_millis(0), TextSpeed::Fast);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TextSpeed::Medium.as_ref(), "medium");
        assert_eq!(TextSpeed::from_str("slow").unwrap(), TextSpeed::Slow);
        assert_eq!(
            serde_json::to_value(TextSpeed::Fast).unwrap(),
            serde_json::json!("fast")
        );
    }
}
