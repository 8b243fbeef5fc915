mod common;

use common::{FakeQuoteService, QuoteSpec, TestEnv, SETTLE_TIMEOUT};
use quotedeck::cli::{run_command, Command, QuoteArgs};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn run(env: &TestEnv, command: Command) -> anyhow::Result<String> {
    let mut vm = env.view_model();
    let mut out = Vec::new();
    run_command(&mut vm, &command, SETTLE_TIMEOUT, &mut out)?;
    Ok(String::from_utf8(out).expect("Output is not UTF-8"))
}

#[test]
fn test_list_prints_every_quote() {
    let service = FakeQuoteService::with_quotes(vec![
        QuoteSpec::new("Mark Twain", "Get started.").tags(&["motivation"]),
        QuoteSpec::new("Oscar Wilde", "Be yourself.").tags(&["life", "wit"]),
    ]);
    let env = TestEnv::with_service(&service);

    let output = run(&env, Command::List).unwrap();

    assert_eq!(
        output,
        "q1 | Mark Twain | motivation | Get started.\n\
         q2 | Oscar Wilde | life, wit | Be yourself.\n"
    );
}

#[test]
fn test_search_prints_matches() {
    let service = FakeQuoteService::with_quotes(vec![
        QuoteSpec::new("Mark Twain", "Get started."),
        QuoteSpec::new("Oscar Wilde", "Be yourself."),
    ]);
    let env = TestEnv::with_service(&service);

    let output = run(
        &env,
        Command::Search {
            author: "twain".to_string(),
        },
    )
    .unwrap();

    assert!(output.contains("Mark Twain"));
    assert!(!output.contains("Oscar Wilde"));
}

#[test]
fn test_add_then_prints_refreshed_list() {
    let service = FakeQuoteService::default();
    let env = TestEnv::with_service(&service);

    let output = run(
        &env,
        Command::Add(QuoteArgs {
            author: "Twain".to_string(),
            tags: "wit, humor".to_string(),
            text: "...".to_string(),
        }),
    )
    .unwrap();

    assert_eq!(output, "q1 | Twain | wit, humor | ...\n");
    assert_eq!(service.snapshot().len(), 1);
}

#[test]
fn test_update_replaces_quote() {
    let service = FakeQuoteService::with_quotes(vec![QuoteSpec::new("Wilde", "Old text.")]);
    let env = TestEnv::with_service(&service);

    run(
        &env,
        Command::Update {
            id: "q1".to_string(),
            quote: QuoteArgs {
                author: "Oscar Wilde".to_string(),
                tags: String::new(),
                text: "Be yourself.".to_string(),
            },
        },
    )
    .unwrap();

    let stored = service.snapshot();
    assert_eq!(stored[0].author, "Oscar Wilde");
    assert_eq!(stored[0].quote_text, "Be yourself.");
}

#[test]
fn test_delete_unknown_id_fails() {
    let service = FakeQuoteService::with_quotes(vec![QuoteSpec::new("Twain", "Get started.")]);
    let env = TestEnv::with_service(&service);

    let err = run(
        &env,
        Command::Delete {
            id: "nope".to_string(),
        },
    )
    .unwrap_err();

    assert!(err.to_string().contains("delete quote"));
    assert_eq!(service.snapshot().len(), 1);
}

#[test]
fn test_add_with_blank_author_is_rejected_locally() {
    let env = TestEnv::start();

    let err = run(
        &env,
        Command::Add(QuoteArgs {
            author: "  ".to_string(),
            tags: String::new(),
            text: "...".to_string(),
        }),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Author is required");
    assert!(env.received().is_empty());
}

#[test]
fn test_server_error_is_reported() {
    let env = TestEnv::start();
    env.mount(
        Mock::given(method("GET"))
            .and(path("/quotes"))
            .respond_with(ResponseTemplate::new(503)),
    );

    let err = run(&env, Command::List).unwrap_err();

    assert!(err.to_string().starts_with("Failed to load quotes"));
    assert!(err.to_string().contains("503"));
}
