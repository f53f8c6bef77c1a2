use crate::core::Raster;
use crate::curves::{CurveCoeffs, apply_curve};
use crate::error::{TilestackError, TilestackResult};

/// A named adjustment with open-ended parameters, interpreted when applied.
/// Unknown kinds are a hard error at apply time, never a silent skip: an
/// ignored adjustment would ship an undetected rendering discrepancy.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentInstance {
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl AdjustmentInstance {
    pub fn curves(black: u8, grey: u8, white: u8) -> Self {
        Self {
            kind: "curves".to_string(),
            params: serde_json::json!([black, grey, white]),
        }
    }
}

/// Apply each adjustment in list order, the output of one feeding the next.
/// An empty list is the identity.
pub fn apply_adjustments(
    raster: &mut Raster,
    adjustments: &[AdjustmentInstance],
) -> TilestackResult<()> {
    for inst in adjustments {
        match inst.kind.as_str() {
            "curves" => {
                let (black, grey, white) = curves_params(&inst.params)?;
                let co = CurveCoeffs::solve(black, grey, white)?;
                apply_curve(raster, co);
            }
            other => {
                return Err(TilestackError::UnsupportedAdjustment(other.to_string()));
            }
        }
    }
    Ok(())
}

fn curves_params(params: &serde_json::Value) -> TilestackResult<(u8, u8, u8)> {
    let Some(arr) = params.as_array() else {
        return Err(TilestackError::invalid_stack(
            "curves expects [black, grey, white] parameters",
        ));
    };
    if arr.len() != 3 {
        return Err(TilestackError::invalid_stack(format!(
            "curves expects 3 parameters, got {}",
            arr.len()
        )));
    }

    let mut anchors = [0u8; 3];
    for (i, v) in arr.iter().enumerate() {
        let n = v.as_u64().ok_or_else(|| {
            TilestackError::invalid_stack("curves parameters must be integers")
        })?;
        anchors[i] = u8::try_from(n).map_err(|_| {
            TilestackError::invalid_stack("curves parameters must be in 0..=255")
        })?;
    }
    Ok((anchors[0], anchors[1], anchors[2]))
}
