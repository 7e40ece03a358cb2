use crate::RepomanWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use repoman::config::Credentials;
use repoman::storage::{CredentialStore, FileCredentialStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn docstring(step: &Step) -> String {
    step.docstring
        .as_ref()
        .expect("Expected a docstring")
        .trim()
        .to_string()
}

fn captured(world: &RepomanWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

async fn mount(world: &RepomanWorld, verb: &str, endpoint: &str, template: ResponseTemplate) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(template)
        .mount(world.server())
        .await;
}

#[given("a mock GitHub API")]
async fn given_mock_api(world: &mut RepomanWorld) {
    world.server = Some(MockServer::start().await);
}

#[given(regex = r#"^the saved credentials are username "(.*)" and token "(.*)"$"#)]
async fn given_saved_credentials(world: &mut RepomanWorld, username: String, token: String) {
    let store = FileCredentialStore::new(world.config_path());
    store
        .save(&Credentials::new(username, token))
        .expect("Failed to write credentials for test setup");
}

#[given("no saved credentials")]
async fn given_no_saved_credentials(world: &mut RepomanWorld) {
    let config_path = world.config_path();
    let _ = std::fs::remove_file(&config_path);
}

#[given("the config file content is:")]
async fn given_config_file_content(world: &mut RepomanWorld, step: &Step) {
    let config_path = world.config_path();
    std::fs::write(&config_path, docstring(step))
        .unwrap_or_else(|e| panic!("Failed to write config file {:?}: {}", config_path, e));
}

#[given(regex = r#"^the API responds to (GET|PATCH) "(.*)" with status (\d+) and body:$"#)]
async fn given_api_responds_with_body(
    world: &mut RepomanWorld,
    verb: String,
    endpoint: String,
    status: u16,
    step: &Step,
) {
    let template = ResponseTemplate::new(status).set_body_raw(docstring(step), "application/json");
    mount(world, &verb, &endpoint, template).await;
}

#[given(regex = r#"^the API responds to (GET|PATCH) "(.*)" with status (\d+)$"#)]
async fn given_api_responds(world: &mut RepomanWorld, verb: String, endpoint: String, status: u16) {
    mount(world, &verb, &endpoint, ResponseTemplate::new(status)).await;
}

#[when(regex = r"^I run `repoman(.*)`$")]
async fn when_run_repoman(world: &mut RepomanWorld, command_line: String) {
    let config_path = world.config_path();
    let mut args: Vec<String> = std::iter::once("repoman".to_string())
        .chain(command_line.split_whitespace().map(str::to_string))
        .collect();
    args.extend([
        "--config".to_string(),
        config_path.display().to_string(),
        "--api-url".to_string(),
        world.server().uri(),
    ]);

    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let result = repoman::run::run(args, writer_option).await;

    world.captured_output = buffer;
    world.result = Some(result);
}

#[then(regex = r#"^the output should be "(.*)"$"#)]
async fn then_output_should_be(world: &mut RepomanWorld, expected_output: String) {
    let output = captured(world);
    assert_eq!(
        output.trim_end(),
        expected_output,
        "Expected output '{}', but got:\n---\n{}\n---",
        expected_output,
        output.trim_end()
    );
}

#[then("the output should be:")]
async fn then_output_should_be_block(world: &mut RepomanWorld, step: &Step) {
    let expected_output = docstring(step);
    let output = captured(world);
    assert_eq!(output.trim_end(), expected_output);
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_should_contain(world: &mut RepomanWorld, expected: String) {
    let output = captured(world);
    assert!(
        output.contains(&expected),
        "Expected '{}' in output:\n---\n{}\n---",
        expected,
        output
    );
}

#[then("the output should be empty")]
async fn then_output_should_be_empty(world: &mut RepomanWorld) {
    let output = captured(world);
    assert!(
        output.trim().is_empty(),
        "Expected output to be empty, but got:\n---\n{}\n---",
        output
    );
}

#[then("the command should succeed")]
async fn then_command_should_succeed(world: &mut RepomanWorld) {
    match &world.result {
        Some(Ok(())) => {}
        other => panic!("Command should have succeeded, got {:?}", other),
    }
}

#[then(regex = r"^the command should fail with exit code (\d+)$")]
async fn then_command_should_fail(world: &mut RepomanWorld, code: u8) {
    match &world.result {
        Some(Err(err)) => assert_eq!(err.exit_code(), code, "Unexpected error: {err}"),
        other => panic!("Command should have failed, got {:?}", other),
    }
}

#[then(regex = r"^the API should have received (\d+) requests?$")]
async fn then_api_received(world: &mut RepomanWorld, count: usize) {
    let requests = world.server().received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), count, "Requests: {:?}", requests);
}

#[then(regex = r#"^the API should have received (\d+) requests? with token "(.*)"$"#)]
async fn then_api_received_with_token(world: &mut RepomanWorld, count: usize, token: String) {
    let requests = world.server().received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), count);
    let expected = format!("token {token}");
    for request in &requests {
        let authorization = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());
        assert_eq!(authorization, Some(expected.as_str()));
    }
}

#[then(regex = r#"^the saved credentials should be username "(.*)" and token "(.*)"$"#)]
async fn then_saved_credentials(world: &mut RepomanWorld, username: String, token: String) {
    let store = FileCredentialStore::new(world.config_path());
    let saved = store.load().expect("Saved credentials should parse");
    assert_eq!(saved, Some(Credentials::new(username, token)));
}
