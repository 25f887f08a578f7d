//! Human-readable summary renderer for variances.

use crate::diff::model::Variance;

/// Render one line per variance: `path: left -> right`.
///
/// Whole-value variances render their path as `(root)`. The summary is
/// informational only.
pub fn render_human_summary(variances: &[Variance<'_>]) -> String {
    if variances.is_empty() {
        return "No variances.\n".to_string();
    }

    let mut out = format!("{} variance(s):\n", variances.len());
    for variance in variances {
        out.push_str(&format!("- {}\n", variance));
    }
    out
}
