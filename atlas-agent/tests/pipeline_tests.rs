use atlas_agent::{
    DecisionSupporter, InsightExtractionAgent, InsightExtractor, Orchestrator, SummarizationAgent,
    Summarizer,
};
use atlas_core::{AtlasError, Decision, Insight, InsightKind, Result, Summary};
use atlas_model::MockLlm;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const STAGE1_JSON: &str = r#"{"key_features":["battery"],"main_positives":["battery life"],"main_negatives":["screen durability"],"customer_sentiment_overview":"mixed"}"#;

fn sample_summary() -> Summary {
    Summary {
        key_features: vec!["battery".to_string()],
        main_positives: vec!["battery life".to_string()],
        main_negatives: vec!["screen durability".to_string()],
        customer_sentiment_overview: "mixed".to_string(),
    }
}

#[tokio::test]
async fn summarization_agent_parses_exact_shape() {
    let model = Arc::new(MockLlm::new("gemini-1.5-flash").with_response(STAGE1_JSON));
    let agent = SummarizationAgent::new(model);

    let summary = agent
        .run("Great battery life but screen cracks easily")
        .await
        .unwrap();
    assert_eq!(summary, sample_summary());
}

#[tokio::test]
async fn per_agent_model_override_reaches_the_request() {
    let model = Arc::new(MockLlm::new("gemini-1.5-flash").with_response(STAGE1_JSON));
    let agent = SummarizationAgent::new(model.clone()).with_model_name("gemini-1.5-pro");

    agent
        .run("Great battery life but screen cracks easily")
        .await
        .unwrap();
    assert_eq!(model.recorded_models(), vec!["gemini-1.5-pro"]);
}

#[tokio::test]
async fn summary_is_passed_serialized_into_stage_two_prompt() {
    let model = Arc::new(
        MockLlm::new("gemini-1.5-flash")
            .with_response(r#"[{"insight":"screens crack","type":"pain_point","confidence":0.9}]"#),
    );
    let agent = InsightExtractionAgent::new(model.clone());

    let summary = sample_summary();
    let insights = agent.run(&summary).await.unwrap();
    assert_eq!(insights[0].kind, InsightKind::PainPoint);

    let prompts = model.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    let summary_json = serde_json::to_string(&summary).unwrap();
    assert!(
        prompts[0].contains(&summary_json),
        "stage-2 prompt must embed the serialized summary verbatim"
    );
}

#[tokio::test]
async fn full_pipeline_through_mock_model() {
    let model = Arc::new(
        MockLlm::new("gemini-1.5-flash")
            .with_response(format!("```json\n{STAGE1_JSON}\n```"))
            .with_response(r#"[{"insight":"screens crack","type":"pain_point","confidence":0.9}]"#)
            .with_response(
                r#"[{"recommendation":"strengthen screen","reasoning":"common complaint","triggering_insights":["screens crack"]}]"#,
            ),
    );
    let orchestrator = Orchestrator::from_model(model);

    let result = orchestrator
        .run_pipeline("Great battery life but screen cracks easily")
        .await
        .unwrap();

    assert_eq!(result.summary, sample_summary());
    assert_eq!(result.insights.len(), 1);
    assert_eq!(result.decisions[0].recommendation, "strengthen screen");
}

#[tokio::test]
async fn malformed_stage_output_aborts_pipeline() {
    // Stage 2 returns prose instead of JSON; stage 3 must never run.
    let model = Arc::new(
        MockLlm::new("gemini-1.5-flash")
            .with_response(STAGE1_JSON)
            .with_response("Sure! Here are some insights for you."),
    );
    let orchestrator = Orchestrator::from_model(model.clone());

    let err = orchestrator.run_pipeline("some text").await.unwrap_err();
    assert!(matches!(err, AtlasError::MalformedOutput(_)));
    assert_eq!(model.recorded_prompts().len(), 2);
}

// Recording stubs for call-order verification.

struct StubSummarizer {
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn run(&self, _text: &str) -> Result<Summary> {
        self.calls.lock().unwrap().push("summarize");
        if self.fail {
            return Err(AtlasError::Model("model unreachable".to_string()));
        }
        Ok(sample_summary())
    }
}

struct StubInsightExtractor {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl InsightExtractor for StubInsightExtractor {
    async fn run(&self, _summary: &Summary) -> Result<Vec<Insight>> {
        self.calls.lock().unwrap().push("extract");
        Ok(vec![Insight {
            insight: "screens crack".to_string(),
            kind: InsightKind::PainPoint,
            confidence: 0.9,
        }])
    }
}

struct StubDecisionSupporter {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl DecisionSupporter for StubDecisionSupporter {
    async fn run(&self, _insights: &[Insight]) -> Result<Vec<Decision>> {
        self.calls.lock().unwrap().push("decide");
        Ok(vec![])
    }
}

fn stubbed_orchestrator(
    calls: &Arc<Mutex<Vec<&'static str>>>,
    fail_summarizer: bool,
) -> Orchestrator {
    Orchestrator::new(
        Arc::new(StubSummarizer {
            calls: calls.clone(),
            fail: fail_summarizer,
        }),
        Arc::new(StubInsightExtractor {
            calls: calls.clone(),
        }),
        Arc::new(StubDecisionSupporter {
            calls: calls.clone(),
        }),
    )
}

#[tokio::test]
async fn stages_run_strictly_in_order() {
    let calls = Arc::new(Mutex::new(vec![]));
    let orchestrator = stubbed_orchestrator(&calls, false);

    orchestrator.run_pipeline("some text").await.unwrap();
    assert_eq!(*calls.lock().unwrap(), vec!["summarize", "extract", "decide"]);
}

#[tokio::test]
async fn failed_stage_stops_the_chain_and_propagates() {
    let calls = Arc::new(Mutex::new(vec![]));
    let orchestrator = stubbed_orchestrator(&calls, true);

    let err = orchestrator.run_pipeline("some text").await.unwrap_err();
    assert_eq!(err.to_string(), "Model error: model unreachable");
    assert_eq!(*calls.lock().unwrap(), vec!["summarize"]);
}
