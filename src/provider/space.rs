use crate::{codepoint, descriptor::SpaceSpec, error::FontError};

use super::{AdvanceMap, BuildContext};

/// Codepoints that move the cursor without drawing anything.
#[derive(Debug, Default)]
pub struct SpaceProvider {
    advances: AdvanceMap,
}

impl SpaceProvider {
    pub fn new(advances: impl IntoIterator<Item = (u16, i32)>) -> Self {
        Self {
            advances: advances.into_iter().collect(),
        }
    }

    /// Decodes each `advances` key to its first codepoint.
    ///
    /// Anything after the first codepoint of a key is ignored. A key whose
    /// first codepoint is missing, malformed, NUL or outside the BMP fails the
    /// whole provider.
    pub(crate) fn from_spec(ctx: &BuildContext<'_>, spec: &SpaceSpec) -> Result<Self, FontError> {
        let mut advances = AdvanceMap::default();

        for (key, &advance) in &spec.advances {
            let code = codepoint::first_scalar(key.as_bytes());
            let code = u16::try_from(code)
                .ok()
                .filter(|&c| c != 0)
                .ok_or_else(|| FontError::InvalidAdvanceCodepoint {
                    location: ctx.location.clone(),
                    key: key.clone(),
                })?;
            advances.insert(code, advance);
        }

        log::trace!(
            "font {}: space provider with {} advances",
            ctx.location,
            advances.len()
        );

        Ok(Self { advances })
    }

    pub fn advance(&self, code: u16) -> Option<i32> {
        self.advances.get(&code).copied()
    }

    pub fn advances(&self) -> &AdvanceMap {
        &self.advances
    }
}
