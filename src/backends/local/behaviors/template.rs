// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::consts::{AI_LATENCY_MS, DISCORD_LATENCY_MS, GMAIL_LATENCY_MS};
use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;
use crate::traits::Behavior;
use crate::utils::{lookup_path, parse_config, render_inline};

/// `{{root}}` or `{{root.dotted.path}}` with optional inner whitespace.
fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)((?:\.[A-Za-z0-9_]+)*)\s*\}\}").ok()
        })
        .as_ref()
}

#[derive(Debug, Default, Deserialize)]
struct TemplateConfig {
    template: Option<Value>,
}

/// Values placeholders can refer to.
struct Scope<'a> {
    node_id: &'a str,
    input: &'a Value,
    config: Value,
    memory: Value,
}

impl Scope<'_> {
    fn resolve(&self, root: &str, path: &str) -> Option<Value> {
        let base = match root {
            "input" => self.input,
            "config" => &self.config,
            "memory" => &self.memory,
            "node" if path.is_empty() => return Some(Value::String(self.node_id.to_string())),
            _ => return None,
        };
        lookup_path(base, path).cloned()
    }
}

/// Templated-output generator.
///
/// Renders a canned JSON value, interpolating `{{input}}`, `{{input.path}}`,
/// `{{config.path}}`, `{{memory.key}}` and `{{node}}` placeholders in every
/// string it contains. A string that is exactly one placeholder is replaced by
/// the referenced value itself, keeping its JSON type; missing references
/// render as `null` (or an empty string inline).
///
/// The node's `template` option overrides the behaviour's default template.
/// The AI, mail and chat nodes of the designer palette are template behaviours
/// with canned defaults, standing in for the real integrations.
pub struct TemplateBehavior {
    name: &'static str,
    default_template: Value,
    nominal_latency: Duration,
}

impl TemplateBehavior {
    pub fn new(name: &'static str, default_template: Value, nominal_latency: Duration) -> Self {
        Self {
            name,
            default_template,
            nominal_latency,
        }
    }

    /// Generic template node; without a `template` option it echoes its input.
    pub fn generic() -> Self {
        Self::new("template", json!("{{input}}"), Duration::ZERO)
    }

    /// Stand-in for the "AI Agent" node.
    pub fn ai() -> Self {
        Self::new(
            "ai",
            json!({
                "model": "simulated",
                "prompt": "{{config.prompt}}",
                "summary": "Summary of: {{input}}",
            }),
            Duration::from_millis(AI_LATENCY_MS),
        )
    }

    /// Stand-in for the "Gmail" node.
    pub fn gmail() -> Self {
        Self::new(
            "gmail",
            json!({
                "status": "sent",
                "to": "{{config.to}}",
                "subject": "{{config.subject}}",
                "body": "{{input}}",
            }),
            Duration::from_millis(GMAIL_LATENCY_MS),
        )
    }

    /// Stand-in for the "Discord" node.
    pub fn discord() -> Self {
        Self::new(
            "discord",
            json!({
                "status": "posted",
                "channel": "{{config.channel}}",
                "content": "{{input}}",
            }),
            Duration::from_millis(DISCORD_LATENCY_MS),
        )
    }

    fn render(&self, template: &Value, scope: &Scope<'_>) -> Value {
        match template {
            Value::String(text) => render_string(text, scope),
            Value::Array(items) => Value::Array(items.iter().map(|item| self.render(item, scope)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.render(value, scope)))
                    .collect::<Map<String, Value>>(),
            ),
            other => other.clone(),
        }
    }
}

fn render_string(text: &str, scope: &Scope<'_>) -> Value {
    let Some(pattern) = placeholder_pattern() else {
        return Value::String(text.to_string());
    };

    if let Some(captures) = pattern.captures(text) {
        let whole = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
        if whole.len() == text.len() {
            return resolve_capture(&captures, scope).unwrap_or(Value::Null);
        }
    }

    let rendered = pattern.replace_all(text, |captures: &Captures<'_>| {
        resolve_capture(captures, scope)
            .map(|value| render_inline(&value))
            .unwrap_or_default()
    });
    Value::String(rendered.into_owned())
}

fn resolve_capture(captures: &Captures<'_>, scope: &Scope<'_>) -> Option<Value> {
    let root = captures.get(1)?.as_str();
    let path = captures
        .get(2)
        .map(|m| m.as_str().trim_start_matches('.'))
        .unwrap_or_default();
    scope.resolve(root, path)
}

#[async_trait]
impl Behavior for TemplateBehavior {
    async fn invoke(
        &self,
        config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        let parsed: TemplateConfig = parse_config(config)?;
        ctx.simulate_latency(self.nominal_latency).await?;

        let template = parsed.template.as_ref().unwrap_or(&self.default_template);
        let scope = Scope {
            node_id: ctx.node_id(),
            input: &input,
            config: Value::Object(config.clone()),
            memory: Value::Object(ctx.memory().snapshot().await),
        };
        Ok(self.render(template, &scope))
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn nominal_latency(&self) -> Duration {
        self.nominal_latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value: Value) -> NodeConfig {
        match value {
            Value::Object(map) => map,
            _ => panic!("config must be an object"),
        }
    }

    #[tokio::test]
    async fn test_generic_template_echoes_input() {
        let behavior = TemplateBehavior::generic();
        let ctx = BehaviorContext::standalone("t");
        let input = json!({"x": 1});

        let output = behavior.invoke(&NodeConfig::new(), input.clone(), &ctx).await;
        assert_eq!(output, Ok(input));
    }

    #[tokio::test]
    async fn test_interpolation_sources() {
        let behavior = TemplateBehavior::generic();
        let ctx = BehaviorContext::standalone("greeter");
        ctx.memory().set("greeting", json!("hello")).await;

        let cfg = config(json!({
            "name_suffix": "!",
            "template": {
                "text": "{{ memory.greeting }} {{input.user.name}}{{config.name_suffix}}",
                "user": "{{input.user}}",
                "count": "{{input.count}}",
                "from": "{{node}}",
                "missing": "{{input.nope}}",
                "inline_missing": "[{{memory.nope}}]",
                "literal": 42
            }
        }));

        let output = behavior
            .invoke(&cfg, json!({"user": {"name": "ada"}, "count": 3}), &ctx)
            .await
            .unwrap();

        assert_eq!(output["text"], json!("hello ada!"));
        assert_eq!(output["user"], json!({"name": "ada"}));
        assert_eq!(output["count"], json!(3));
        assert_eq!(output["from"], json!("greeter"));
        assert_eq!(output["missing"], Value::Null);
        assert_eq!(output["inline_missing"], json!("[]"));
        assert_eq!(output["literal"], json!(42));
    }

    #[tokio::test]
    async fn test_canned_integrations() {
        let ctx = BehaviorContext::standalone("n");

        let ai = TemplateBehavior::ai()
            .invoke(&config(json!({"prompt": "tl;dr"})), json!("long email"), &ctx)
            .await
            .unwrap();
        assert_eq!(ai["summary"], json!("Summary of: long email"));
        assert_eq!(ai["prompt"], json!("tl;dr"));

        let mail = TemplateBehavior::gmail()
            .invoke(&config(json!({"to": "team@example.com"})), json!("hi"), &ctx)
            .await
            .unwrap();
        assert_eq!(mail["status"], json!("sent"));
        assert_eq!(mail["to"], json!("team@example.com"));
        assert_eq!(mail["subject"], Value::Null);

        let chat = TemplateBehavior::discord();
        assert_eq!(chat.name(), "discord");
        assert_eq!(chat.nominal_latency(), Duration::from_millis(DISCORD_LATENCY_MS));
    }
}
