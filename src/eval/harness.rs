//! LLM-as-judge evaluation of the query pipeline.
//!
//! The harness answers a question through the normal retrieve → format →
//! generate chain, then sends a second, raw prompt asking the backend to
//! grade its own answer against an expected one.

use crate::core::errors::ApiError;
use crate::llm::prompt;
use crate::llm::GenerationBackend;
use crate::rag::Retriever;

/// Answers `question` with `k` retrieved chunks, then judges the answer
/// against `expected_answer`. Returns the verdict.
pub async fn evaluate(
    question: &str,
    expected_answer: &str,
    retriever: &Retriever,
    backend: &dyn GenerationBackend,
    k: usize,
) -> Result<bool, ApiError> {
    let chunks = retriever.query(question, k).await?;
    let formatted = Retriever::format_results(&chunks);

    let actual = backend
        .generate_response(&formatted.context_text, question)
        .await?;

    let verdict = backend
        .invoke(&prompt::judge_prompt(expected_answer, &actual))
        .await?;

    let passed = parse_verdict(&verdict)?;
    tracing::info!(passed, backend = backend.name(), "evaluation verdict");
    Ok(passed)
}

/// Extracts the judgment from free-form verdict text: trim, lowercase, then
/// substring match. "true" is checked before "false", so text containing
/// both reads as a pass. Text containing neither is an error rather than a
/// guessed verdict.
pub fn parse_verdict(text: &str) -> Result<bool, ApiError> {
    let cleaned = text.trim().to_lowercase();

    if cleaned.contains("true") {
        Ok(true)
    } else if cleaned.contains("false") {
        Ok(false)
    } else {
        Err(ApiError::AmbiguousVerdict(cleaned))
    }
}
