use crate::error::ParameterError;

/// Invocation parameters for [`super::AlternateFaceLoops`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateParams {
    /// Loops skipped between selected loops; selects every `skip + 1`-th layer.
    pub skip: usize,
    /// Index of the first selected layer.
    pub offset: usize,
    /// Maximum number of passes.
    pub repeat: usize,
    /// Route traversal events to the diagnostic sink.
    pub debug_mode: bool,
}

impl AlternateParams {
    pub const SKIP_MIN: usize = 1;
    pub const SKIP_MAX: usize = 100;
    pub const REPEAT_MIN: usize = 1;
    pub const REPEAT_MAX: usize = 20;

    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::OutOfRange`] for the first parameter that
    /// falls outside its range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check("skip", self.skip, Self::SKIP_MIN, Self::SKIP_MAX)?;
        check("repeat", self.repeat, Self::REPEAT_MIN, Self::REPEAT_MAX)?;
        Ok(())
    }
}

impl Default for AlternateParams {
    fn default() -> Self {
        Self {
            skip: 1,
            offset: 0,
            repeat: 5,
            debug_mode: false,
        }
    }
}

fn check(
    parameter: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ParameterError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = AlternateParams::default();
        assert_eq!((params.skip, params.offset, params.repeat), (1, 0, 5));
        assert!(!params.debug_mode);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_skip_rejected() {
        let params = AlternateParams {
            skip: 0,
            ..AlternateParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::OutOfRange {
                parameter: "skip",
                value: 0,
                min: 1,
                max: 100,
            })
        );
    }

    #[test]
    fn repeat_bounds() {
        for (repeat, ok) in [(0, false), (1, true), (20, true), (21, false)] {
            let params = AlternateParams {
                repeat,
                ..AlternateParams::default()
            };
            assert_eq!(params.validate().is_ok(), ok, "repeat = {repeat}");
        }
    }

    #[test]
    fn large_offset_is_accepted() {
        let params = AlternateParams {
            offset: 1_000,
            ..AlternateParams::default()
        };
        assert!(params.validate().is_ok());
    }
}
