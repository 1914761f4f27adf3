//! Engine pipeline behavior against in-memory index and provider fakes.

use std::sync::atomic::Ordering;

use codeask_core::index::CodeIndex;
use codeask_core::llm::ChatProvider;
use codeask_core::qa::{NO_SNIPPETS_MESSAGE, SYSTEM_PROMPT};
use codeask_core::QaEngine;
use codeask_test_utils::{
    sample_results, CannedProvider, FailingIndex, FailingProvider, StaticIndex,
};
use pretty_assertions::assert_eq;

fn engine_with(index: Box<dyn CodeIndex>, provider: Box<dyn ChatProvider>) -> QaEngine {
    QaEngine::new(index, provider, "gpt-4o")
}

#[test_log::test(tokio::test)]
async fn test_empty_results_short_circuit() {
    let provider = CannedProvider::new("should never be used");
    let calls = provider.call_counter();
    let engine = engine_with(Box::new(StaticIndex::empty()), Box::new(provider));

    let answer = engine.ask("anything?").await;

    assert_eq!(answer, NO_SNIPPETS_MESSAGE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn test_grounded_answer_is_returned_verbatim() {
    let engine = engine_with(
        Box::new(StaticIndex::with_results(sample_results(2))),
        Box::new(CannedProvider::new("The daemon starts in main().")),
    );

    let answer = engine.ask("where does the daemon start?").await;
    assert_eq!(answer, "The daemon starts in main().");
}

#[test_log::test(tokio::test)]
async fn test_request_carries_context_and_question() {
    let provider = CannedProvider::new("ok");
    let requests = provider.request_log();
    let engine = engine_with(
        Box::new(StaticIndex::with_results(sample_results(2))),
        Box::new(provider),
    );

    engine.ask("what is module_0?").await;

    let log = requests.lock().unwrap();
    assert_eq!(log.len(), 1);
    let request = &log[0];
    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.temperature, 0.1);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, "user");
    assert!(request.messages[1]
        .content
        .starts_with("Here is the relevant code context:\n---\nFile: "));
    assert!(request.messages[1]
        .content
        .ends_with("Question: what is module_0?"));
}

#[test_log::test(tokio::test)]
async fn test_request_does_not_cap_generation_length() {
    // The produced interface is {model, messages, temperature}; the answer
    // must come back whole, so no token ceiling is sent.
    let provider = CannedProvider::new("ok");
    let requests = provider.request_log();
    let engine = engine_with(
        Box::new(StaticIndex::with_results(sample_results(1))),
        Box::new(provider),
    );

    engine.ask("q").await;

    let log = requests.lock().unwrap();
    assert_eq!(log[0].max_tokens, None);
}

#[test_log::test(tokio::test)]
async fn test_search_failure_is_contained() {
    let engine = engine_with(
        Box::new(FailingIndex::new("connection refused")),
        Box::new(CannedProvider::new("unused")),
    );

    let answer = engine.ask("q").await;
    assert!(answer.contains("Error during search:"));
    assert!(answer.contains("connection refused"));
    assert!(answer.contains("Is your database running and indexed?"));
}

#[test_log::test(tokio::test)]
async fn test_api_failure_is_contained() {
    let engine = engine_with(
        Box::new(StaticIndex::with_results(sample_results(1))),
        Box::new(FailingProvider::new("dns failure")),
    );

    let answer = engine.ask("q").await;
    assert!(answer.contains("Error calling Azure OpenAI:"));
    assert!(answer.contains("dns failure"));
}

#[tokio::test]
async fn test_context_keeps_result_order_in_prompt() {
    codeask_test_utils::tracing_setup::init_test_tracing();

    let provider = CannedProvider::new("ok");
    let requests = provider.request_log();
    let results = sample_results(3);
    let engine = engine_with(
        Box::new(StaticIndex::with_results(results)),
        Box::new(provider),
    );

    engine.ask("q").await;

    let log = requests.lock().unwrap();
    let user = &log[0].messages[1].content;
    let first = user.find("src/module_0.rs").unwrap();
    let second = user.find("src/module_1.rs").unwrap();
    let third = user.find("src/module_2.rs").unwrap();
    assert!(first < second && second < third);
}
