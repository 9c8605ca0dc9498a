//! Plain-text fallback for chains without a template.

use tokenforge_core::Artifact;
use tokenforge_core::model::DEFAULT_PROGRAM_NAME;

use crate::SynthRequest;

pub(crate) fn render(request: &SynthRequest<'_>) -> Artifact {
    let mut body = format!(
        "Target chain: {} (code template not yet available)\n\nPrompt:\n{}\n",
        request.chain, request.prompt
    );
    if let Some(capability) = request.capability() {
        body.push_str("\nAI capability:\n");
        body.push_str(capability);
        body.push('\n');
    }

    Artifact {
        file_name: format!("{}_prompt.txt", request.chain),
        full_source_text: body,
        program_name: DEFAULT_PROGRAM_NAME.to_string(),
        logic_breakdown: None,
        tokenomics: None,
        suggestions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokenforge_core::ChainId;

    #[test]
    fn echo_body_is_literal() {
        let request = SynthRequest {
            prompt: "Create a program named vault\nwith {braces} and \"quotes\"",
            chain: ChainId::Sui,
            capability: Some("forecast demand"),
            generated_at: Utc::now(),
        };
        let artifact = render(&request);
        assert_eq!(artifact.file_name, "sui_prompt.txt");
        assert_eq!(
            artifact.full_source_text,
            "Target chain: sui (code template not yet available)\n\n\
             Prompt:\nCreate a program named vault\nwith {braces} and \"quotes\"\n\n\
             AI capability:\nforecast demand\n"
        );
        assert_eq!(artifact.program_name, "my_program");
        assert!(artifact.suggestions.is_empty());
    }

    #[test]
    fn echo_is_total_on_empty_input() {
        let request = SynthRequest {
            prompt: "",
            chain: ChainId::Aptos,
            capability: None,
            generated_at: Utc::now(),
        };
        let artifact = render(&request);
        assert!(artifact.full_source_text.ends_with("Prompt:\n\n"));
        assert!(!artifact.full_source_text.contains("AI capability"));
    }
}
