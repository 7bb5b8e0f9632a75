//! Prompt: compose a greeting from a prompt string and an optional name.

use serde_json::{json, Value};
use switchyard::{Category, HandlerContext, HandlerDescriptor, InputSchema, ParamKind};

use super::str_arg;

pub fn greeting() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Prompt,
        "greeting",
        "Compose a greeting message, optionally addressed to a name.",
        InputSchema::new()
            .required("prompt", ParamKind::String)
            .optional("name", ParamKind::String)
            .optional("formal", ParamKind::Boolean),
        |ctx: HandlerContext| async move {
            let prompt = str_arg(&ctx.args, "prompt")?;
            let name = ctx.args.get("name").and_then(Value::as_str);
            let formal = ctx
                .args
                .get("formal")
                .and_then(Value::as_bool)
                .unwrap_or(true);

            ctx.progress.report("composing greeting").await;

            let prefix = if formal { "Hello" } else { "Hey" };
            let opening = match name {
                Some(name) => format!("{prefix}, {name}! "),
                None => format!("{prefix}! "),
            };
            let content = if prompt.is_empty() {
                format!("{opening}Nice to meet you.")
            } else {
                format!("{opening}{prompt}")
            };

            ctx.progress.report("greeting ready").await;
            Ok(json!({ "content": content }))
        },
    )
    .streaming()
}
