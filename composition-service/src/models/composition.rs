//! Request and response bodies for `POST /generate-composition`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tempo echoed back when the caller gives none.
pub const DEFAULT_BPM: i64 = 120;

/// Key echoed back when the caller gives none.
pub const DEFAULT_KEY: &str = "C";

/// Length used when `length_bars` is omitted.
pub const DEFAULT_LENGTH_BARS: i64 = 8;

/// Message attached to every successful response.
pub const SUCCESS_MESSAGE: &str = "Composition generated successfully";

/// Incoming composition request.
///
/// `bpm` and `length_bars` are not range-checked; the bundled form limits
/// them client-side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CompositionRequest {
    /// Free-text description of the music wanted.
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,

    /// Tempo in beats per minute.
    #[serde(default, deserialize_with = "lenient_int::optional")]
    pub bpm: Option<i64>,

    /// Musical key, e.g. "C major".
    #[serde(default)]
    pub key: Option<String>,

    #[serde(
        default = "default_length_bars",
        deserialize_with = "lenient_int::required"
    )]
    pub length_bars: i64,
}

fn default_length_bars() -> i64 {
    DEFAULT_LENGTH_BARS
}

/// Integer fields that also accept numeric strings and whole-number floats,
/// so `"120"` and `120.0` both read as 120. Fractions, non-numeric strings
/// and booleans are rejected.
mod lenient_int {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer, a whole-number float or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            whole(v).ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let trimmed = v.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole))
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    struct OptionalIntVisitor;

    impl<'de> Visitor<'de> for OptionalIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("null or an integer-like value")
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<i64>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<i64>, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Option<i64>, D::Error> {
            required(d).map(Some)
        }
    }

    fn whole(v: f64) -> Option<i64> {
        // i64::MAX as f64 rounds up to 2^63, which is out of range.
        (v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64)
            .then_some(v as i64)
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        d.deserialize_any(IntVisitor)
    }

    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        d.deserialize_option(OptionalIntVisitor)
    }
}

impl CompositionRequest {
    /// The single user message sent upstream.
    ///
    /// Only the prompt is embedded; tempo, key and length are echoed in the
    /// response but never reach the model.
    pub fn model_prompt(&self) -> String {
        format!(
            "Generate a detailed music composition structure for: {}. \
             Include chord progressions, melody notes, rhythm patterns, and arrangement suggestions.",
            self.prompt
        )
    }

    /// Tempo to echo; zero counts as unset.
    pub fn effective_bpm(&self) -> i64 {
        self.bpm.filter(|bpm| *bpm != 0).unwrap_or(DEFAULT_BPM)
    }

    /// Key to echo; an empty string counts as unset.
    pub fn effective_key(&self) -> String {
        self.key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(DEFAULT_KEY)
            .to_string()
    }
}

/// Echoed parameters plus the model's raw output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub prompt: String,
    pub bpm: i64,
    pub key: String,
    pub length_bars: i64,
    pub ai_response: String,
}

impl Composition {
    pub fn new(request: &CompositionRequest, ai_response: String) -> Self {
        Self {
            prompt: request.prompt.clone(),
            bpm: request.effective_bpm(),
            key: request.effective_key(),
            length_bars: request.length_bars,
            ai_response,
        }
    }
}

/// Envelope returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionResponse {
    pub success: bool,
    pub message: String,
    pub composition: Option<Composition>,
}

impl CompositionResponse {
    pub fn generated(composition: Composition) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            composition: Some(composition),
        }
    }
}
