use crate::client::ModelClient;
use crate::error::Result;
use crate::fence::parse_deck;
use crate::prompt::{self, Mode};
use slide_common::Deck;
use std::sync::Arc;

/// Produces complete decks from natural-language instructions.
#[derive(Clone)]
pub struct Synthesizer {
    client: Arc<dyn ModelClient>,
}

impl Synthesizer {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Create a deck (`prior == None`) or revise `prior` per `instruction`.
    /// The returned deck replaces the prior one wholesale.
    pub async fn synthesize(&self, instruction: &str, prior: Option<&Deck>) -> Result<Deck> {
        let mode = Mode::for_prior(prior);
        tracing::info!(?mode, "synthesizing deck");

        let raw = self.client.complete(prompt::build(instruction, prior)).await?;
        tracing::debug!(len = raw.len(), "model returned text");

        let deck = parse_deck(&raw).inspect_err(|e| {
            tracing::warn!("unparseable model output: {e}");
            tracing::debug!(raw = %raw, "raw model output");
        })?;

        report_ids(&deck, prior);
        tracing::info!(title = %deck.title, slides = deck.slide_count(), "deck ready");
        Ok(deck)
    }
}

/// Id preservation is a prompt convention only; deviations are logged.
fn report_ids(deck: &Deck, prior: Option<&Deck>) {
    let dups = deck.duplicate_ids();
    if !dups.is_empty() {
        tracing::warn!(?dups, "deck has duplicate slide ids");
    }
    if let Some(prior) = prior {
        let missing = deck.missing_ids(prior);
        if !missing.is_empty() {
            tracing::warn!(?missing, "edit dropped slide ids from the prior deck");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StubClient;
    use crate::error::{ErrorKind, GenerationError};
    use async_trait::async_trait;
    use slide_common::{Layout, Slide};
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed text.
    struct Recording {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for Recording {
        async fn complete(&self, prompt: String) -> crate::error::Result<String> {
            self.prompts.lock().unwrap().push(prompt);
            Ok(self.reply.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ModelClient for Failing {
        async fn complete(&self, _prompt: String) -> crate::error::Result<String> {
            Err(GenerationError::Transport("connection reset".into()))
        }
    }

    const SOLAR: &str = r#"```json
{"title":"Solar Energy","slides":[
 {"id":"slide-1","title":"Solar Energy","content":["Harnessing the sun"],"layout":"title","backgroundColor":"FFFFFF"},
 {"id":"slide-2","title":"How it works","content":["Photons","Cells","Inverters"],"layout":"content"},
 {"id":"slide-3","title":"Benefits","content":["Clean","Renewable","Cheap"],"layout":"content"},
 {"id":"slide-4","title":"Challenges","content":["Intermittency","Storage","Land"],"layout":"content"},
 {"id":"slide-5","title":"Outlook","content":["Growth","Policy","Innovation"],"layout":"content"}
]}
```"#;

    #[tokio::test]
    async fn create_mode_returns_parsed_deck() {
        let client = Recording::new(SOLAR);
        let synth = Synthesizer::new(client.clone());
        let deck = synth
            .synthesize("Create a presentation about Solar Energy", None)
            .await
            .unwrap();

        assert!((5..=8).contains(&deck.slide_count()));
        assert_eq!(deck.slides[0].layout, Layout::Title);
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("typically 5-8 slides"));
    }

    #[tokio::test]
    async fn edit_mode_sends_prior_deck_and_keeps_ids() {
        let prior = Deck::new(
            "Solar Energy",
            vec![
                Slide::new("slide-1", "Solar Energy", Layout::Title),
                Slide::new("slide-2", "How it works", Layout::Content),
            ],
        );
        let client = Recording::new(
            r#"{"title":"Solar Energy","slides":[
                {"id":"slide-1","title":"Solar Energy","content":[],"layout":"title"},
                {"id":"slide-2","title":"How solar works","content":["Photons"],"layout":"content"}
            ]}"#,
        );
        let synth = Synthesizer::new(client.clone());
        let deck = synth.synthesize("rename slide 2", Some(&prior)).await.unwrap();

        assert!(deck.missing_ids(&prior).is_empty());
        assert_eq!(deck.slides[1].title, "How solar works");
        assert!(client.prompts()[0].contains("\"id\": \"slide-2\""));
    }

    #[tokio::test]
    async fn prose_reply_is_a_parse_error() {
        let synth = Synthesizer::new(Arc::new(StubClient::new("I cannot help with that.")));
        let err = synth.synthesize("topic", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let synth = Synthesizer::new(Arc::new(Failing));
        let err = synth.synthesize("topic", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
