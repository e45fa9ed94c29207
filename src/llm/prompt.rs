//! Prompt templates shared by the serving path and the evaluation harness.

/// Renders the generation prompt. An empty context is valid input; the model
/// is still instructed to answer from it.
pub fn rag_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based only on the following context:\n\n{}\n\n---\n\nAnswer the question based on the above context: {}",
        context, question
    )
}

/// Renders the self-judgment prompt asking for a literal true/false verdict.
pub fn judge_prompt(expected: &str, actual: &str) -> String {
    format!(
        "Expected Response: {}\nActual Response: {}\n---\n(Answer with 'true' or 'false') Does the actual response match the expected response?",
        expected, actual
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rag_prompt_embeds_context_and_question() {
        let prompt = rag_prompt("Alpha Corp has 4 head-staff employees.", "How many head staff?");
        assert!(prompt.contains("Alpha Corp has 4 head-staff employees."));
        assert!(prompt.contains("How many head staff?"));
        assert!(prompt.contains("based only on the following context"));
    }

    #[test]
    fn judge_prompt_embeds_both_responses() {
        let prompt = judge_prompt("2015", "It was founded in 2015.");
        assert!(prompt.contains("Expected Response: 2015"));
        assert!(prompt.contains("Actual Response: It was founded in 2015."));
        assert!(prompt.contains("'true' or 'false'"));
    }
}
