//! Tests for [`ChatSession`] driving a trainer.

use std::sync::Arc;

use async_trait::async_trait;
use fitzone::error::RATE_LIMITED_MESSAGE;
use fitzone::session::GREETING;
use fitzone::{ChatSession, RateLimitConfig, Result, Role, TextGenerator, TrainerService, Turn};

struct Parrot;

#[async_trait]
impl TextGenerator for Parrot {
    fn name(&self) -> &str {
        "parrot"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let question = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Customer: "))
            .unwrap_or_default();
        Ok(format!("You asked: {question}"))
    }
}

fn trainer(max_requests: usize) -> TrainerService {
    TrainerService::builder()
        .generator(Arc::new(Parrot))
        .rate_limit(RateLimitConfig::new().max_requests(max_requests))
        .build()
        .unwrap()
}

#[tokio::test]
async fn ask_appends_user_then_assistant() {
    let trainer = trainer(10);
    let mut session = ChatSession::new("guest-1");

    let reply = session.ask(&trainer, "Is there a sauna?").await.to_string();
    assert_eq!(reply, "You asked: Is there a sauna?");

    assert_eq!(
        session.history(),
        &[
            Turn::assistant(GREETING),
            Turn::user("Is there a sauna?"),
            Turn::assistant("You asked: Is there a sauna?"),
        ]
    );
}

#[tokio::test]
async fn failure_messages_are_part_of_the_transcript() {
    let trainer = trainer(1);
    let mut session = ChatSession::new("guest-2");

    session.ask(&trainer, "first").await;
    let reply = session.ask(&trainer, "second").await;
    assert_eq!(reply, RATE_LIMITED_MESSAGE);

    let last = session.history().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, RATE_LIMITED_MESSAGE);
    assert_eq!(session.history().len(), 5);
}

#[test]
fn sessions_with_different_identities_do_not_share_quota() {
    let trainer = trainer(1);
    let mut a = ChatSession::new("a");
    let mut b = ChatSession::new("b");

    tokio_test::block_on(async {
        assert_eq!(a.ask(&trainer, "q").await, "You asked: q");
        assert_eq!(b.ask(&trainer, "q").await, "You asked: q");
        assert_eq!(a.ask(&trainer, "q").await, RATE_LIMITED_MESSAGE);
    });
}

#[test]
fn turns_serialize_with_lowercase_roles() {
    let json = serde_json::to_value(Turn::user("hi")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "hi" }));

    let turn: Turn = serde_json::from_str(r#"{"role":"assistant","content":"hey"}"#).unwrap();
    assert_eq!(turn, Turn::assistant("hey"));
}
