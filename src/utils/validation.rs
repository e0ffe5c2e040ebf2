use validator::Validate;

use crate::error::{Error, Result};

pub fn validate<T: Validate>(val: &T) -> std::result::Result<(), validator::ValidationErrors> {
    val.validate()
}

pub fn ensure_score_in_scale(score: i32, scale: i32) -> Result<()> {
    if (1..=scale).contains(&score) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Score {} is outside the 1-{} rating scale",
            score, scale
        )))
    }
}
