//! Text rendering of hypothesis lists

use super::Hypothesis;

/// Render numbered hypotheses, one block each
pub fn render_hypotheses(hypotheses: &[Hypothesis]) -> String {
    let mut lines = Vec::new();
    for (index, hypothesis) in hypotheses.iter().enumerate() {
        lines.push(format!("**Hypothesis {}: {}**", index + 1, hypothesis.title));
        lines.push(String::new());
        lines.push(format!("📋 **Description:** {}", hypothesis.narrative));
        lines.push(String::new());
        lines.push(format!("🎯 **MITRE ATT&CK techniques:** {}", hypothesis.techniques_line()));
        lines.push(String::new());
        lines.push(format!("🔍 **Recommended action:** {}", hypothesis.recommended_action));
        lines.push(String::new());
        lines.push("-".repeat(40));
        lines.push(String::new());
    }
    lines.join("\n")
}
