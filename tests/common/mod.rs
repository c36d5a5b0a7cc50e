//! Shared setup for the chat scenario used across integration tests:
//! a `user` type deduplicated by username and a `message` type that lazily
//! requests two user dependents when none are supplied.
#![allow(dead_code)]

use fixtura::{
    FixtureDefinition, FixtureError, FixtureRegistry, FixtureRequester, Options, Scenario, Value,
};
use serde_json::json;

pub fn user_factory(
    options: &Options,
    _fixtures: &mut FixtureRequester,
) -> Result<Value, FixtureError> {
    let index = options.index().unwrap_or(0);
    let username = options
        .get("username")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("username{index}"));
    let password = options
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or("123456")
        .to_string();
    Ok(Value::from_json(json!({
        "username": username,
        "password": password,
    })))
}

pub fn message_factory(
    options: &Options,
    fixtures: &mut FixtureRequester,
) -> Result<Value, FixtureError> {
    let from = match options.get("from") {
        Some(user) => user.clone(),
        None => fixtures.with("user", Options::new())?,
    };
    let to = match options.get("to") {
        Some(user) => user.clone(),
        None => fixtures.with("user", Options::new())?,
    };
    let content = options.get("content").cloned().unwrap_or(Value::Nil);
    Ok(Options::new()
        .field("from", from)
        .field("to", to)
        .field("content", content)
        .into_value())
}

pub fn chat_registry() -> FixtureRegistry {
    let mut registry = FixtureRegistry::new();
    registry.define(
        "user",
        FixtureDefinition::new(user_factory).with_key("username"),
    );
    registry.define("message", FixtureDefinition::new(message_factory));
    registry
}

pub fn chat_scenario() -> Scenario {
    Scenario::new(chat_registry())
}

pub fn username(instance: &Value) -> &str {
    instance
        .get_path("username")
        .and_then(Value::as_str)
        .expect("user instance carries a username")
}
